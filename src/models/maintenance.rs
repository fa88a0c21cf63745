use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::validation::{flexible_id, flexible_number, missing_fields, MissingFields, RequiredFields};

// POST /api/maintenance
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogMaintenanceRequest {
    #[serde(default, deserialize_with = "flexible_id")]
    #[validate(required)]
    pub vehicle_id: Option<i64>,
    pub performed_by: Option<String>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub cost: Option<f64>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl RequiredFields for LogMaintenanceRequest {
    const REQUIRED: &'static [(&'static str, &'static str)] = &[("vehicle_id", "vehicleId")];
}

#[derive(Debug, Clone)]
pub struct NewMaintenance {
    pub vehicle_id: i64,
    pub performed_by: Option<String>,
    pub cost: Option<f64>,
    pub description: Option<String>,
    pub performed_on: Option<NaiveDate>,
}

impl TryFrom<LogMaintenanceRequest> for NewMaintenance {
    type Error = MissingFields;

    fn try_from(req: LogMaintenanceRequest) -> Result<Self, Self::Error> {
        let missing = missing_fields(&req);
        match req.vehicle_id {
            Some(vehicle_id) if !missing.any() => Ok(NewMaintenance {
                vehicle_id,
                performed_by: req.performed_by,
                cost: req.cost,
                description: req.description,
                performed_on: req.date,
            }),
            _ => Err(missing),
        }
    }
}
