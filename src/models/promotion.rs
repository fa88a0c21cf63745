use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::validation::{flexible_number, missing_fields, MissingFields, RequiredFields};

// POST /api/promotions
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatePromotionRequest {
    #[validate(required, length(min = 1))]
    pub code: Option<String>,
    pub description: Option<String>,
    pub criteria: Option<String>,
    pub expiry: Option<NaiveDate>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub discount: Option<f64>,
}

impl RequiredFields for CreatePromotionRequest {
    const REQUIRED: &'static [(&'static str, &'static str)] = &[("code", "code")];
}

#[derive(Debug, Clone)]
pub struct NewPromotion {
    pub promo_code: String,
    pub description: Option<String>,
    pub eligibility_criteria: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub discount_amount: Option<f64>,
}

impl TryFrom<CreatePromotionRequest> for NewPromotion {
    type Error = MissingFields;

    fn try_from(req: CreatePromotionRequest) -> Result<Self, Self::Error> {
        let missing = missing_fields(&req);
        match req.code {
            Some(promo_code) if !missing.any() => Ok(NewPromotion {
                promo_code,
                description: req.description,
                eligibility_criteria: req.criteria,
                expiry_date: req.expiry,
                discount_amount: req.discount,
            }),
            _ => Err(missing),
        }
    }
}
