use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use super::{ApiJson, ApiPath};
use crate::{
    error::{AppError, AppResult},
    models::RegisterVehicleRequest,
    services::RegistrationService,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vehicles", post(register_vehicle))
        .route("/vehicles/{id}", get(get_vehicle))
}

// POST /api/vehicles
async fn register_vehicle(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterVehicleRequest>,
) -> AppResult<impl IntoResponse> {
    let vehicle_id = RegistrationService::new(state.store.clone())
        .register_vehicle(req)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "vehicleId": vehicle_id,
            "message": "Vehicle registered successfully"
        })),
    ))
}

// GET /api/vehicles/{id}
async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<impl IntoResponse> {
    let vehicle = state
        .store
        .find_vehicle(id)
        .await
        .map_err(AppError::store("Failed to load vehicle"))?
        .ok_or(AppError::NotFound { resource: "Vehicle", id })?;

    Ok(Json(vehicle))
}
