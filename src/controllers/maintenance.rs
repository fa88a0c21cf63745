use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::json;
use std::sync::Arc;

use super::ApiJson;
use crate::{
    error::{AppError, AppResult},
    models::{LogMaintenanceRequest, NewMaintenance},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/maintenance", post(log_maintenance))
}

// POST /api/maintenance
async fn log_maintenance(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LogMaintenanceRequest>,
) -> AppResult<impl IntoResponse> {
    let maintenance = NewMaintenance::try_from(req)?;
    let maintenance_id = state
        .store
        .insert_maintenance(maintenance)
        .await
        .map_err(AppError::store("Failed to log maintenance"))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "maintenanceId": maintenance_id })),
    ))
}
