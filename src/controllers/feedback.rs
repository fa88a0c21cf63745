use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::json;
use std::sync::Arc;

use super::ApiJson;
use crate::{
    error::{AppError, AppResult},
    models::{NewFeedback, SubmitFeedbackRequest},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/feedback", post(submit_feedback))
}

// POST /api/feedback
async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SubmitFeedbackRequest>,
) -> AppResult<impl IntoResponse> {
    let feedback = NewFeedback::try_from(req)?;
    let feedback_id = state
        .store
        .insert_feedback(feedback)
        .await
        .map_err(AppError::store("Failed to submit feedback"))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "feedbackId": feedback_id })),
    ))
}
