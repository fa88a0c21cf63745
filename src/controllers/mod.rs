pub mod drivers;
pub mod passengers;
pub mod vehicles;
pub mod rides;
pub mod payments;
pub mod feedback;
pub mod maintenance;
pub mod promotions;
pub mod support;

use axum::{
    extract::{FromRequest, FromRequestParts},
    Router,
};
use std::sync::Arc;

use crate::{error::AppError, AppState};

/// JSON body extractor whose rejections use the API error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor with the same error shape as [`ApiJson`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(drivers::routes())
        .merge(passengers::routes())
        .merge(vehicles::routes())
        .merge(rides::routes())
        .merge(payments::routes())
        .merge(feedback::routes())
        .merge(maintenance::routes())
        .merge(promotions::routes())
        .merge(support::routes())
}
