use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::json;
use std::sync::Arc;

use super::ApiJson;
use crate::{
    error::{AppError, AppResult},
    models::{NewSupportRequest, SubmitSupportRequest},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/support", post(submit_support_request))
}

// POST /api/support
async fn submit_support_request(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SubmitSupportRequest>,
) -> AppResult<impl IntoResponse> {
    let request = NewSupportRequest::try_from(req)?;
    let request_id = state
        .store
        .insert_support_request(request)
        .await
        .map_err(AppError::store("Failed to submit request"))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "requestId": request_id })),
    ))
}
