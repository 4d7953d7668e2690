//! # REST Routes
//!
//! Router construction.

use crate::api::rest::handlers::{estimate_all, estimate_one, health, AppState};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the REST router with tracing and CORS layers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/estimates", post(estimate_all))
        .route("/api/v1/estimates/{service_class}", post(estimate_one))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
