mod config;
mod dispatch;
mod error;
mod handlers;
mod path;
mod render;
mod routes;
mod state;
mod vault;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Context;
use config::Config;
use state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use vault::{SecretStore, VaultClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("vault-raw-browser {} starting", env!("CARGO_PKG_VERSION"));
    config.log_startup();

    let vault_client = VaultClient::from_config(&config)
        .context("Failed to create Vault client")?;

    match vault_client.health_check().await {
        Ok(health) => tracing::info!(
            "Vault {} reachable (initialized: {}, sealed: {}, standby: {})",
            health.version,
            health.initialized,
            health.sealed,
            health.standby
        ),
        Err(e) => tracing::warn!("Vault health check failed: {}", e),
    }

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let state = AppState {
        store: Arc::new(vault_client),
        config: Arc::new(config),
    };
    let app = routes::router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("vault-raw-browser stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
