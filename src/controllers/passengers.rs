use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

use super::ApiJson;
use crate::{
    error::{AppError, AppResult},
    models::{NewPassenger, RegisterPassengerRequest},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/passengers", get(list_passengers).post(register_passenger))
}

// POST /api/passengers
async fn register_passenger(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterPassengerRequest>,
) -> AppResult<impl IntoResponse> {
    let passenger = NewPassenger::try_from(req)?;
    let passenger_id = state
        .store
        .insert_passenger(passenger)
        .await
        .map_err(AppError::store("Failed to add passenger"))?;

    tracing::info!("Passenger {} registered", passenger_id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "passengerId": passenger_id })),
    ))
}

// GET /api/passengers
async fn list_passengers(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    let passengers = state
        .store
        .list_passengers()
        .await
        .map_err(AppError::store("Failed to load passengers"))?;

    Ok(Json(passengers))
}
