pub mod client;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod hub;
pub mod models;
pub mod routes;
pub mod state;
pub mod websocket;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use docs::ApiDoc;
use routes::{create_api_routes, create_ws_routes};
use state::AppState;

/// Assemble the full application router: REST under /api, the realtime
/// endpoint at /ws, Swagger UI, and request tracing.
pub fn build_app(app_state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", create_api_routes(app_state.clone()))
        .merge(create_ws_routes(app_state))
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
