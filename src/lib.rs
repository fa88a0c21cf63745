pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn store::Store>,
}

impl AppState {
    pub async fn new(config: &config::DatabaseConfig) -> Result<Arc<Self>, store::StoreError> {
        let store = store::connect(config).await?;
        Ok(Arc::new(Self { store }))
    }

    pub fn with_store(store: Arc<dyn store::Store>) -> Arc<Self> {
        Arc::new(Self { store })
    }
}

/// The full HTTP surface: health checks plus everything under `/api`.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Ride Hailing API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
