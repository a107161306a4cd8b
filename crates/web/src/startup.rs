use std::time::Duration;

use storage::{Database, error::Result};

/// Connects to the store, retrying with exponential backoff.
///
/// Gives up after `attempts` tries and returns the last error.
pub async fn connect_with_retry(
    url: &str,
    max_connections: u32,
    attempts: u32,
    backoff: Duration,
) -> Result<Database> {
    let mut delay = backoff;
    let mut attempt = 1;

    loop {
        match Database::connect(url, max_connections).await {
            Ok(db) => return Ok(db),
            Err(e) if attempt < attempts => {
                tracing::warn!(
                    attempt,
                    attempts,
                    "Database connection failed: {}; retrying in {:?}",
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(attempts, "Database connection failed: {}", e);
                return Err(e);
            }
        }
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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

    tracing::info!("Shutdown signal received");
}
