//! Catalog API - REST server for the product catalog

use axum::Router;
use axum_helpers::{cors_layer_from_env, create_production_app, create_router, health_router};
use core_config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use std::time::Duration;
use tracing::{error, info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let config = Config::from_env().inspect_err(|e| {
        error!("Invalid configuration: {}", e);
    })?;

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());
    let state = AppState::connect(config).await?;

    database::mongodb::spawn_connectivity_check(
        state.mongo_client.clone(),
        RetryConfig::new().with_max_retries(2),
    );

    let products = state.products();
    tokio::spawn(async move {
        if let Err(e) = products.init_indexes().await {
            warn!("Failed to create product indexes: {}", e);
        }
    });

    let app = build_app(&state)?;

    info!(
        "Starting Catalog API on {} (database: {}, collection: {})",
        state.config.server.address(),
        state.config.mongodb.database(),
        state.config.collection
    );

    let mongo_client = state.mongo_client.clone();
    create_production_app(app, &state.config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing MongoDB connections");
        mongo_client.shutdown().await;
        info!("MongoDB connection closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}

/// Product routes, readiness, liveness, docs and middleware
fn build_app(state: &AppState) -> eyre::Result<Router> {
    let router = create_router::<openapi::ApiDoc>(api::routes(state), cors_layer_from_env()?);
    Ok(router.merge(health_router(state.config.app)))
}
