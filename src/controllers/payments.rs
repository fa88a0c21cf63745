use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::json;
use std::sync::Arc;

use super::ApiJson;
use crate::{error::AppResult, models::RecordPaymentRequest, services::PaymentService, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/payments", post(record_payment))
}

// POST /api/payments
async fn record_payment(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RecordPaymentRequest>,
) -> AppResult<impl IntoResponse> {
    let payment_id = PaymentService::new(state.store.clone()).record(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "paymentId": payment_id,
            "message": "Payment recorded successfully"
        })),
    ))
}
