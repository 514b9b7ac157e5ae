//! Environmental sensor pipeline: an MQTT ingester feeding SQLite (plus a
//! CSV mirror) and an HTTP service exposing the accumulated history.

pub mod api;
pub mod config;
pub mod db;
pub mod ingest;
pub mod mirror;
pub mod mqtt;

use tokio::signal;
use tracing::info;

/// Resolves on Ctrl+C or SIGTERM. Both service binaries use it to shut
/// down cleanly.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
