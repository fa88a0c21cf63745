use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use super::{ApiJson, ApiPath};
use crate::{
    error::{AppError, AppResult},
    models::BookRideRequest,
    services::BookingService,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rides", post(book_ride))
        .route("/rides/{id}", get(get_ride))
        .route("/rides-for-feedback", get(rides_for_feedback))
}

// POST /api/rides
async fn book_ride(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<BookRideRequest>,
) -> AppResult<impl IntoResponse> {
    let ride = BookingService::new(state.store.clone()).book(req).await?;

    Ok(Json(json!({
        "success": true,
        "rideId": ride.ride_id,
        "fare": ride.fare,
        "driverName": ride.driver_name,
        "vehicleMake": ride.vehicle_make,
        "message": "Ride booked successfully!"
    })))
}

// GET /api/rides/{id}
async fn get_ride(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<impl IntoResponse> {
    let ride = state
        .store
        .find_ride(id)
        .await
        .map_err(AppError::store("Failed to load ride"))?
        .ok_or(AppError::NotFound { resource: "Ride", id })?;

    Ok(Json(ride))
}

// GET /api/rides-for-feedback
async fn rides_for_feedback(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    let rides = state
        .store
        .completed_rides()
        .await
        .map_err(AppError::store("Failed to load completed rides"))?;

    Ok(Json(rides))
}
