//! `recs-server`: loads the catalog, builds the content model and serves
//! recommendations over HTTP.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use data_loader::Catalog;
use server::api::{create_router, AppState};
use server::{RecommendationService, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,server=debug")),
        )
        .init();

    let config = ServerConfig::parse();
    config.validate()?;
    info!("Starting recs-server");

    info!("Loading catalog from {}...", config.catalog.display());
    let catalog = Catalog::load_from_csv(&config.catalog)
        .with_context(|| format!("Failed to load catalog from {}", config.catalog.display()))?;

    // The model must be fully built before we accept connections
    let resolver_config = config.resolver_config();
    let service = tokio::task::spawn_blocking(move || {
        RecommendationService::new(Arc::new(catalog), resolver_config)
    })
    .await
    .context("Model build task panicked")?;

    let app = create_router(AppState::new(service, config.default_k));

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
