//! Payment recording.
//!
//! A ride takes at most one payment. A payment whose status is exactly
//! `Completed` also completes the ride, in the same store operation as the
//! payment insert.

use std::sync::Arc;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{NewPayment, RecordPaymentRequest},
    store::{PaymentRecording, Store},
};

pub struct PaymentService {
    store: Arc<dyn Store>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Returns the new payment id.
    pub async fn record(&self, req: RecordPaymentRequest) -> AppResult<i64> {
        let payment = NewPayment::try_from(req)?;
        let ride_id = payment.ride_id;

        let outcome = self
            .store
            .record_payment(payment)
            .await
            .map_err(AppError::store("Failed to record payment"))?;

        match outcome {
            PaymentRecording::Recorded {
                payment_id,
                ride_completed,
            } => {
                info!(
                    "Payment {} recorded for ride {} (ride completed: {})",
                    payment_id, ride_id, ride_completed
                );
                Ok(payment_id)
            }
            PaymentRecording::RideNotFound => Err(AppError::RideNotFound(ride_id)),
            PaymentRecording::AlreadyPaid => Err(AppError::DuplicatePayment),
        }
    }
}
