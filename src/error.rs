//! HTTP-facing error classification.
//!
//! Client errors (bad input, missing or conflicting rows) map to 4xx with a
//! machine-readable `code`; store failures map to 500 with the underlying
//! message in `details`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;
use crate::validation::MissingFields;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingFields(MissingFields),

    #[error("Malformed request body")]
    MalformedBody(#[from] JsonRejection),

    #[error("Malformed request path")]
    MalformedPath(#[from] PathRejection),

    #[error("Vehicle not found or not available")]
    VehicleUnavailable,

    #[error("Passenger not found")]
    PassengerNotFound,

    #[error("Driver with ID {0} not found")]
    DriverNotFound(i64),

    #[error("Driver {driver_id} does not operate vehicle {vehicle_id}")]
    DriverMismatch { driver_id: i64, vehicle_id: i64 },

    #[error("Vehicle with this license plate already exists")]
    DuplicatePlate,

    #[error("Ride with ID {0} not found")]
    RideNotFound(i64),

    #[error("Payment already exists for this ride")]
    DuplicatePayment,

    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

pub type AppResult<T> = Result<T, AppError>;

impl From<MissingFields> for AppError {
    fn from(missing: MissingFields) -> Self {
        AppError::MissingFields(missing)
    }
}

impl AppError {
    /// For `map_err`: wraps a store failure with what the request was doing.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedBody(rejection) => rejection.status(),
            AppError::MalformedPath(rejection) => rejection.status(),
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingFields(_) => "MISSING_FIELDS",
            AppError::MalformedBody(_) => "MALFORMED_BODY",
            AppError::MalformedPath(_) => "MALFORMED_PATH",
            AppError::VehicleUnavailable => "VEHICLE_UNAVAILABLE",
            AppError::PassengerNotFound => "PASSENGER_NOT_FOUND",
            AppError::DriverNotFound(_) => "DRIVER_NOT_FOUND",
            AppError::DriverMismatch { .. } => "DRIVER_MISMATCH",
            AppError::DuplicatePlate => "DUPLICATE_PLATE",
            AppError::RideNotFound(_) => "RIDE_NOT_FOUND",
            AppError::DuplicatePayment => "DUPLICATE_PAYMENT",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Store { .. } => "STORE_ERROR",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::MissingFields(missing) => Some(json!({ "missing": missing })),
            AppError::MalformedBody(rejection) => Some(json!(rejection.body_text())),
            AppError::MalformedPath(rejection) => Some(json!(rejection.body_text())),
            AppError::Store { source, .. } => Some(json!(source.to_string())),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Store { context, source } => {
                tracing::error!("{}: {}", context, source);
            }
            AppError::MissingFields(missing) => {
                tracing::warn!("Missing fields: {:?}", missing.names());
            }
            other => tracing::warn!("Rejected request: {}", other),
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: self.code(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_errors_are_400_with_a_code() {
        let (status, body) = body_of(AppError::VehicleUnavailable).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Vehicle not found or not available");
        assert_eq!(body["code"], "VEHICLE_UNAVAILABLE");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn store_errors_are_500_with_the_underlying_message() {
        let err = AppError::store("Database error")(StoreError::MissingReference {
            table: "rides",
            id: 9,
        });
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Database error");
        assert_eq!(body["code"], "STORE_ERROR");
        assert_eq!(body["details"], "rides row 9 referenced but does not exist");
    }

    #[tokio::test]
    async fn lookups_that_miss_are_404() {
        let (status, body) = body_of(AppError::NotFound {
            resource: "Ride",
            id: 3,
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Ride with ID 3 not found");
    }
}
