use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::Availability;
use crate::validation::{flexible_number, missing_fields, MissingFields, RequiredFields};

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub contact_number: Option<String>,
    pub status: Availability,
    pub schedule: Option<String>,
    pub rating: Option<f64>,
    pub insurance_document: Option<String>,
    pub driving_license_number: Option<String>,
    pub preferred_payment_method: Option<String>,
}

// Row of GET /api/drivers
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DriverSummary {
    #[serde(rename = "DriverID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
}

// POST /api/drivers
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDriverRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    pub contact_no: Option<String>,
    pub status: Option<Availability>,
    pub schedule: Option<String>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub rating: Option<f64>,
    pub insurance_document: Option<String>,
    pub driving_license_number: Option<String>,
    pub preferred_payment_method: Option<String>,
}

impl RequiredFields for RegisterDriverRequest {
    const REQUIRED: &'static [(&'static str, &'static str)] = &[("name", "name")];
}

#[derive(Debug, Clone)]
pub struct NewDriver {
    pub name: String,
    pub contact_number: Option<String>,
    pub status: Availability,
    pub schedule: Option<String>,
    pub rating: Option<f64>,
    pub insurance_document: Option<String>,
    pub driving_license_number: Option<String>,
    pub preferred_payment_method: Option<String>,
}

impl TryFrom<RegisterDriverRequest> for NewDriver {
    type Error = MissingFields;

    fn try_from(req: RegisterDriverRequest) -> Result<Self, Self::Error> {
        let missing = missing_fields(&req);
        match req.name {
            Some(name) if !missing.any() => Ok(NewDriver {
                name,
                contact_number: req.contact_no,
                status: req.status.unwrap_or(Availability::Available),
                schedule: req.schedule,
                rating: req.rating,
                insurance_document: req.insurance_document,
                driving_license_number: req.driving_license_number,
                preferred_payment_method: req.preferred_payment_method,
            }),
            _ => Err(missing),
        }
    }
}
