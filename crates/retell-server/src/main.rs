//! Server entry point: configuration, logging, wiring and graceful shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use retell_client::{RetellClient, RetellRepository};
use retell_config::Config;
use retell_core::AgentRepository;
use retell_server::services::health::{HealthAggregator, HealthService, RetellProbe};
use retell_server::services::metrics::InMemoryMetrics;
use retell_server::{build_router, ServerState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?,
        )
        .compact()
        .init();

    info!("Using Retell API at {}", config.base_url);
    let client = RetellClient::new(&config.base_url, &config.api_key)
        .with_timeout(config.api_timeout)
        .with_retry_attempts(config.retry_attempts);
    let repository: Arc<dyn AgentRepository> = Arc::new(RetellRepository::new(client));

    let aggregator = HealthAggregator::new().with_probe("retell_api", Arc::new(RetellProbe::new(repository.clone())));
    let state = Arc::new(ServerState {
        repository,
        health: HealthService::new(aggregator),
        metrics: Arc::new(InMemoryMetrics::new()?),
    });

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
