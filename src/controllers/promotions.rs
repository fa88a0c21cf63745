use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::json;
use std::sync::Arc;

use super::ApiJson;
use crate::{
    error::{AppError, AppResult},
    models::{CreatePromotionRequest, NewPromotion},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/promotions", post(create_promotion))
}

// POST /api/promotions
async fn create_promotion(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreatePromotionRequest>,
) -> AppResult<impl IntoResponse> {
    let promotion = NewPromotion::try_from(req)?;
    let promotion_id = state
        .store
        .insert_promotion(promotion)
        .await
        .map_err(AppError::store("Failed to add promotion"))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "promotionId": promotion_id })),
    ))
}
