use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use super::{ApiJson, ApiPath};
use crate::{
    error::{AppError, AppResult},
    models::{NewDriver, RegisterDriverRequest},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drivers", get(list_drivers).post(register_driver))
        .route("/drivers/{id}", get(get_driver))
}

// POST /api/drivers
async fn register_driver(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterDriverRequest>,
) -> AppResult<impl IntoResponse> {
    let driver = NewDriver::try_from(req)?;
    let driver_id = state
        .store
        .insert_driver(driver)
        .await
        .map_err(AppError::store("Failed to add driver"))?;

    tracing::info!("Driver {} registered", driver_id);
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "driverId": driver_id }))))
}

// GET /api/drivers
async fn list_drivers(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    let drivers = state
        .store
        .list_drivers()
        .await
        .map_err(AppError::store("Failed to load drivers"))?;

    Ok(Json(drivers))
}

// GET /api/drivers/{id}
async fn get_driver(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<impl IntoResponse> {
    let driver = state
        .store
        .find_driver(id)
        .await
        .map_err(AppError::store("Failed to load driver"))?
        .ok_or(AppError::NotFound { resource: "Driver", id })?;

    Ok(Json(driver))
}
