use std::panic;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use workshop_live::config::Config;
use workshop_live::state::AppState;

#[tokio::main]
async fn main() {
    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level, but allow debug for our app
            "workshop_live=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        warn!("Using default configuration");
        Config::default()
    });

    // Shared hub + workshop store
    let app_state = Arc::new(AppState::new());

    let app_routes = workshop_live::build_app(app_state);

    let listener = tokio::net::TcpListener::bind(config.server_address())
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", config.server_address()));

    info!("Server running on http://{}", config.server_address());
    info!("Realtime endpoint at ws://{}/ws", config.server_address());
    info!(
        "Swagger UI available at http://{}/swagger",
        config.server_address()
    );

    axum::serve(listener, app_routes)
        .await
        .expect("Server failed to start");
}
