use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::Availability;
use crate::validation::{flexible_id, flexible_number, missing_fields, MissingFields, RequiredFields};

pub const DEFAULT_VEHICLE_TYPE: &str = "Car";

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub make: String,
    pub license_plate: String,
    pub color: String,
    pub vehicle_type: String,
    pub insurance_policy_number: String,
    pub child_seat_available: bool,
    pub capacity: i32,
    pub status: Availability,
    pub driver_id: i64,
}

// POST /api/vehicles
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVehicleRequest {
    #[serde(rename = "driverID", default, deserialize_with = "flexible_id")]
    #[validate(required)]
    pub driver_id: Option<i64>,
    #[validate(required, length(min = 1))]
    pub make: Option<String>,
    #[validate(required, length(min = 1))]
    pub license_plate: Option<String>,
    #[validate(required, length(min = 1))]
    pub color: Option<String>,
    pub vehicle_type: Option<String>,
    #[validate(required, length(min = 1))]
    pub insurance_policy_number: Option<String>,
    pub child_seat_available: Option<bool>,
    #[serde(default, deserialize_with = "flexible_number")]
    #[validate(required, range(min = 1))]
    pub capacity: Option<i32>,
}

impl RequiredFields for RegisterVehicleRequest {
    const REQUIRED: &'static [(&'static str, &'static str)] = &[
        ("driver_id", "driverID"),
        ("make", "make"),
        ("license_plate", "licensePlate"),
        ("color", "color"),
        ("insurance_policy_number", "insurancePolicyNumber"),
        ("capacity", "capacity"),
    ];
}

#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub driver_id: i64,
    pub make: String,
    pub license_plate: String,
    pub color: String,
    pub vehicle_type: String,
    pub insurance_policy_number: String,
    pub child_seat_available: bool,
    pub capacity: i32,
}

impl TryFrom<RegisterVehicleRequest> for NewVehicle {
    type Error = MissingFields;

    fn try_from(req: RegisterVehicleRequest) -> Result<Self, Self::Error> {
        let missing = missing_fields(&req);
        match (
            req.driver_id,
            req.make,
            req.license_plate,
            req.color,
            req.insurance_policy_number,
            req.capacity,
        ) {
            (
                Some(driver_id),
                Some(make),
                Some(license_plate),
                Some(color),
                Some(insurance_policy_number),
                Some(capacity),
            ) if !missing.any() => Ok(NewVehicle {
                driver_id,
                make,
                license_plate: license_plate.trim().to_string(),
                color,
                vehicle_type: req
                    .vehicle_type
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_VEHICLE_TYPE.to_string()),
                insurance_policy_number,
                child_seat_available: req.child_seat_available.unwrap_or(false),
                capacity,
            }),
            _ => Err(missing),
        }
    }
}
