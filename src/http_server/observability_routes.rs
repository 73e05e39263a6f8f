//! Observability HTTP Routes
//!
//! Health checks and counter snapshots.

use std::sync::Arc;

use axum::extract::State;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::api::ApiHandler;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Root banner response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Create observability routes
pub fn observability_routes(handler: Arc<ApiHandler>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(handler)
}

/// Root banner and health check
pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

async fn root_handler() -> impl IntoResponse {
    Json(RootResponse {
        message: "Sales Management API".to_string(),
    })
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Metrics handler - returns counters as JSON
async fn metrics_handler(State(handler): State<Arc<ApiHandler>>) -> impl IntoResponse {
    (StatusCode::OK, Json(handler.metrics()))
}
