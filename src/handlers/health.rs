use axum::Json;
use tracing::debug;

use crate::models::HealthResponse;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}

/// Readiness check endpoint
pub async fn ready_check() -> Json<HealthResponse> {
    debug!("Readiness check requested");
    // The hub is purely in-memory, so readiness coincides with liveness.
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Service is ready".to_string(),
    })
}
