use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(store = %config.store.kind(), "Starting {} v{}", config.app.name, config.app.version);

    // Connects to the configured event store (with retry) and prepares it
    let state = AppState::connect(config).await?;

    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(
        api_routes,
        state.config.cors_allowed_origin.as_deref(),
    )?;

    // Merge health endpoints
    let app = router.merge(health_router(state.config.app));

    info!("Starting Analytics API with production-ready shutdown (30s timeout)");

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing event store connections");
        state.close().await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Analytics API shutdown complete");
    Ok(())
}
