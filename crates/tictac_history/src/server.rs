//! HTTP server startup.

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::api;
use crate::config::ServerConfig;
use crate::db::MatchRepository;
use crate::service::HistoryService;

/// Prepares storage and serves the history API until Ctrl+C.
///
/// Migrations run and an empty store is seeded before the listener binds.
#[instrument(
    skip(config),
    fields(address = %config.bind_address(), database = %config.database_url())
)]
pub async fn run_server(config: &ServerConfig) -> Result<()> {
    let repository = MatchRepository::new(config.database_url().clone())?;
    let service = HistoryService::new(repository);

    let bootstrap = service.clone();
    let seeded = tokio::task::spawn_blocking(move || bootstrap.bootstrap())
        .await
        .context("Storage bootstrap task failed")??;
    info!(seeded = seeded.len(), "Storage ready");

    let app = api::router(service);
    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!("Server ready at http://{}/", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
