use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{active_workshops, create_workshop, diagnostics, health_check, ready_check};
use crate::state::AppState;
use crate::websocket::handler::websocket_handler;

/// Create API routes
pub fn create_api_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/v1/diagnostics", get(diagnostics))
        .route("/v1/workshops", post(create_workshop))
        .route("/v1/workshops/active", get(active_workshops))
        .with_state(app_state)
}

/// Create the WebSocket route (mounted outside the /api prefix)
pub fn create_ws_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .with_state(app_state)
}
