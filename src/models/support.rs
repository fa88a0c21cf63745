use serde::Deserialize;
use validator::Validate;

use crate::validation::{flexible_id, missing_fields, MissingFields, RequiredFields};

// POST /api/support
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSupportRequest {
    #[serde(default, deserialize_with = "flexible_id")]
    #[validate(required)]
    pub ride_id: Option<i64>,
    #[serde(default, deserialize_with = "flexible_id")]
    #[validate(required)]
    pub passenger_id: Option<i64>,
    #[validate(required, length(min = 1))]
    pub issue_description: Option<String>,
}

impl RequiredFields for SubmitSupportRequest {
    const REQUIRED: &'static [(&'static str, &'static str)] = &[
        ("ride_id", "rideId"),
        ("passenger_id", "passengerId"),
        ("issue_description", "issueDescription"),
    ];
}

#[derive(Debug, Clone)]
pub struct NewSupportRequest {
    pub ride_id: i64,
    pub passenger_id: i64,
    pub issue_description: String,
}

impl TryFrom<SubmitSupportRequest> for NewSupportRequest {
    type Error = MissingFields;

    fn try_from(req: SubmitSupportRequest) -> Result<Self, Self::Error> {
        let missing = missing_fields(&req);
        match (req.ride_id, req.passenger_id, req.issue_description) {
            (Some(ride_id), Some(passenger_id), Some(issue_description)) if !missing.any() => {
                Ok(NewSupportRequest {
                    ride_id,
                    passenger_id,
                    issue_description,
                })
            }
            _ => Err(missing),
        }
    }
}
