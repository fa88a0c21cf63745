use serde::Deserialize;
use validator::Validate;

use crate::validation::{flexible_id, flexible_number, missing_fields, MissingFields, RequiredFields};

// POST /api/feedback
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    #[serde(default, deserialize_with = "flexible_id")]
    #[validate(required)]
    pub ride_id: Option<i64>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub from_user_id: Option<i64>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub to_user_id: Option<i64>,
    #[serde(default, deserialize_with = "flexible_number")]
    #[validate(required, range(min = 1))]
    pub rating: Option<i32>,
    pub comments: Option<String>,
}

impl RequiredFields for SubmitFeedbackRequest {
    const REQUIRED: &'static [(&'static str, &'static str)] =
        &[("ride_id", "rideId"), ("rating", "rating")];
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub ride_id: i64,
    pub from_user_id: Option<i64>,
    pub to_user_id: Option<i64>,
    pub rating: i32,
    pub comments: Option<String>,
}

impl TryFrom<SubmitFeedbackRequest> for NewFeedback {
    type Error = MissingFields;

    fn try_from(req: SubmitFeedbackRequest) -> Result<Self, Self::Error> {
        let missing = missing_fields(&req);
        match (req.ride_id, req.rating) {
            (Some(ride_id), Some(rating)) if !missing.any() => Ok(NewFeedback {
                ride_id,
                from_user_id: req.from_user_id,
                to_user_id: req.to_user_id,
                rating,
                comments: req.comments,
            }),
            _ => Err(missing),
        }
    }
}
