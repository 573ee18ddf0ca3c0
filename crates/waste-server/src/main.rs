//! Service binary for the waste ledger.
//!
//! Wires configuration, logging, the record store, and the HTTP layer
//! together and serves until interrupted.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `waste-config.yaml` (or `WASTE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Open the record store (one pooled connection, no retry)
//! 4. Serve the HTTP API until Ctrl-C or SIGTERM
//! 5. Close the record store

mod config;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use waste_api::AppState;
use waste_db::WasteStore;

use crate::config::ServiceConfig;
use crate::error::ServiceError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "waste-config.yaml";

/// Environment variable naming an alternative configuration file.
const ENV_CONFIG_PATH: &str = "WASTE_CONFIG";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the store connection, or the
/// server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_source) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "waste-server starting");
    info!(
        source = config_source,
        host = config.server.host,
        port = config.server.port,
        max_list_limit = config.server.max_list_limit,
        "Configuration loaded"
    );

    if let Err(e) = run(&config).await {
        tracing::error!(error = %e, "waste-server failed");
        return Err(e.into());
    }

    info!("waste-server shutdown complete");
    Ok(())
}

/// Open the store, serve until a shutdown signal, then close the store.
async fn run(config: &ServiceConfig) -> Result<(), ServiceError> {
    // 3. Open the record store.
    let store = WasteStore::connect(&config.store_config()).await?;
    info!(backend = store.backend_name(), "Record store connected");

    // 4. Serve the HTTP API.
    let state = Arc::new(
        AppState::new(store.clone()).with_max_list_limit(config.server.max_list_limit),
    );
    let served = waste_api::start_server(&config.server_config(), state, shutdown_signal()).await;

    // 5. Close the record store, even if serving failed.
    store.close().await;
    served?;
    Ok(())
}

/// Load configuration from the file named by `WASTE_CONFIG`, or
/// `waste-config.yaml`, falling back to defaults when it is absent.
///
/// Returns the config and a description of where it came from; logging
/// is not initialized yet, so the caller reports it.
fn load_config() -> Result<(ServiceConfig, String), ServiceError> {
    let path = std::env::var(ENV_CONFIG_PATH)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        let config = ServiceConfig::from_file(&path)?;
        Ok((config, path.display().to_string()))
    } else {
        Ok((ServiceConfig::from_env()?, String::from("defaults")))
    }
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
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

    info!("Shutdown signal received, draining connections");
}
