use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::{missing_fields, MissingFields, RequiredFields};

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub id: i64,
    pub name: String,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub payment_details: Option<String>,
}

// Row of GET /api/passengers
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PassengerSummary {
    #[serde(rename = "PassengerID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPassengerRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub payment_details: Option<String>,
}

impl RequiredFields for RegisterPassengerRequest {
    const REQUIRED: &'static [(&'static str, &'static str)] = &[("name", "name")];
}

#[derive(Debug, Clone)]
pub struct NewPassenger {
    pub name: String,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub payment_details: Option<String>,
}

impl TryFrom<RegisterPassengerRequest> for NewPassenger {
    type Error = MissingFields;

    fn try_from(req: RegisterPassengerRequest) -> Result<Self, Self::Error> {
        let missing = missing_fields(&req);
        match req.name {
            Some(name) if !missing.any() => Ok(NewPassenger {
                name,
                contact_no: req.contact_no,
                email: req.email,
                payment_details: req.payment_details,
            }),
            _ => Err(missing),
        }
    }
}
