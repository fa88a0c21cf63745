use serde::Deserialize;
use validator::Validate;

use crate::validation::{flexible_id, flexible_number, missing_fields, MissingFields, RequiredFields};

/// Payment status that closes out the ride it pays for.
pub const COMPLETED_PAYMENT_STATUS: &str = "Completed";

// POST /api/payments
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    #[serde(default, deserialize_with = "flexible_id")]
    #[validate(required)]
    pub ride_id: Option<i64>,
    #[validate(required, length(min = 1))]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "flexible_number")]
    #[validate(required, range(exclusive_min = 0.0))]
    pub amount: Option<f64>,
    #[validate(required, length(min = 1))]
    pub payment_status: Option<String>,
}

impl RequiredFields for RecordPaymentRequest {
    const REQUIRED: &'static [(&'static str, &'static str)] = &[
        ("ride_id", "rideId"),
        ("payment_method", "paymentMethod"),
        ("amount", "amount"),
        ("payment_status", "paymentStatus"),
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub ride_id: i64,
    pub payment_method: String,
    pub amount: f64,
    pub payment_status: String,
}

impl NewPayment {
    pub fn completes_ride(&self) -> bool {
        self.payment_status == COMPLETED_PAYMENT_STATUS
    }
}

impl TryFrom<RecordPaymentRequest> for NewPayment {
    type Error = MissingFields;

    fn try_from(req: RecordPaymentRequest) -> Result<Self, Self::Error> {
        let missing = missing_fields(&req);
        match (req.ride_id, req.payment_method, req.amount, req.payment_status) {
            (Some(ride_id), Some(payment_method), Some(amount), Some(payment_status)) if !missing.any() => {
                Ok(NewPayment {
                    ride_id,
                    payment_method,
                    amount,
                    payment_status,
                })
            }
            _ => Err(missing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(status: &str) -> NewPayment {
        NewPayment {
            ride_id: 1,
            payment_method: "Cash".into(),
            amount: 150.0,
            payment_status: status.into(),
        }
    }

    #[test]
    fn only_the_exact_completed_status_closes_the_ride() {
        assert!(payment("Completed").completes_ride());
        assert!(!payment("completed").completes_ride());
        assert!(!payment("Pending").completes_ride());
    }

    #[test]
    fn zero_amount_is_missing() {
        let req = RecordPaymentRequest {
            ride_id: Some(1),
            payment_method: Some("Card".into()),
            amount: Some(0.0),
            payment_status: Some("Pending".into()),
        };
        assert_eq!(NewPayment::try_from(req).unwrap_err().names(), vec!["amount"]);
    }
}
