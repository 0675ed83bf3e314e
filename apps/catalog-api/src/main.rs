//! Catalog API - GraphQL server for the product catalog

use axum_helpers::{cors_layer_from_env, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    // Single attempt; an unreachable cluster aborts startup
    let mongo_client = database::mongodb::connect_from_config(&config.mongodb).await?;

    let state = AppState {
        config: config.clone(),
        mongo_client,
    };

    api::init_indexes(&state).await?;

    let cors = cors_layer_from_env(&state.config.environment)?;
    let router = create_router(api::routes(&state), cors);
    let app = router.merge(health_router(state.config.app));

    info!(
        search_backend = ?state.config.search_backend,
        "Starting Catalog API on port {}, GraphiQL at /graphql",
        state.config.server.port
    );

    let mongo_client = state.mongo_client.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
