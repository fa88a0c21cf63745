use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::{flexible_id, missing_fields, MissingFields, RequiredFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ride_status")]
pub enum RideStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: i64,
    pub fare: f64,
    pub status: RideStatus,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub vehicle_id: i64,
    pub passenger_id: i64,
    pub driver_id: i64,
    pub created_at: DateTime<Utc>,
}

// POST /api/rides
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookRideRequest {
    #[validate(required, length(min = 1))]
    pub pick_up_location: Option<String>,
    #[validate(required, length(min = 1))]
    pub drop_off_location: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    #[validate(required)]
    pub passenger: Option<i64>,
    #[serde(default, deserialize_with = "flexible_id")]
    #[validate(required)]
    pub driver: Option<i64>,
    #[serde(default, deserialize_with = "flexible_id")]
    #[validate(required)]
    pub vehicle: Option<i64>,
}

impl RequiredFields for BookRideRequest {
    const REQUIRED: &'static [(&'static str, &'static str)] = &[
        ("pick_up_location", "pickUpLocation"),
        ("drop_off_location", "dropOffLocation"),
        ("passenger", "passenger"),
        ("driver", "driver"),
        ("vehicle", "vehicle"),
    ];
}

/// A validated booking with its server-side fare, ready for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RideBooking {
    pub pickup_location: String,
    pub dropoff_location: String,
    pub passenger_id: i64,
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub fare: f64,
}

impl BookRideRequest {
    pub fn into_booking(self, fare: f64) -> Result<RideBooking, MissingFields> {
        let missing = missing_fields(&self);
        match (
            self.pick_up_location,
            self.drop_off_location,
            self.passenger,
            self.driver,
            self.vehicle,
        ) {
            (Some(pickup_location), Some(dropoff_location), Some(passenger_id), Some(driver_id), Some(vehicle_id))
                if !missing.any() =>
            {
                Ok(RideBooking {
                    pickup_location,
                    dropoff_location,
                    passenger_id,
                    driver_id,
                    vehicle_id,
                    fare,
                })
            }
            _ => Err(missing),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedRide {
    pub ride_id: i64,
    pub fare: f64,
    pub driver_name: String,
    pub vehicle_make: String,
}

// Row of GET /api/rides-for-feedback
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompletedRide {
    #[serde(rename = "RideID")]
    pub ride_id: i64,
    #[serde(rename = "PickUpLocation")]
    pub pickup_location: String,
    #[serde(rename = "DropOffLocation")]
    pub dropoff_location: String,
    #[serde(rename = "PassengerName")]
    pub passenger_name: String,
    #[serde(rename = "DriverName")]
    pub driver_name: String,
}
