use std::time::Duration;
use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::views::get_view_counter;

const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

const TASK_TIMEOUT_SECS: u64 = 10;

pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, flushing data...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    let shutdown_result = timeout(
        Duration::from_secs(SHUTDOWN_TIMEOUT_SECS),
        perform_shutdown_tasks(),
    )
    .await;

    match shutdown_result {
        Ok(()) => {
            info!("All shutdown tasks completed successfully");
        }
        Err(_) => {
            error!(
                "Shutdown tasks timed out after {} seconds! Forcing exit.",
                SHUTDOWN_TIMEOUT_SECS
            );
            std::process::exit(1);
        }
    }
}

/// Flush whatever is still buffered before the process exits. View counts
/// are best-effort, but a clean shutdown should not drop them.
async fn perform_shutdown_tasks() {
    if let Some(counter) = get_view_counter() {
        match timeout(Duration::from_secs(TASK_TIMEOUT_SECS), counter.flush()).await {
            Ok(()) => {
                info!("ViewCounter flushed successfully");
            }
            Err(_) => {
                error!(
                    "ViewCounter flush timed out after {} seconds",
                    TASK_TIMEOUT_SECS
                );
            }
        }
    } else {
        info!("ViewCounter is not initialized, skipping flush");
    }
}
