use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::storage::{LinkStore, StorageFactory};
use crate::views::manager::ViewCounter;
use crate::views::set_global_view_counter;

pub struct StartupContext {
    pub store: Arc<dyn LinkStore>,
}

/// Prepare the server startup context: connect the store, run migrations,
/// and wire up the view counter with its background flush task.
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    let store: Arc<dyn LinkStore> = storage.clone();
    info!("Using storage backend: {}", store.backend_name().await);

    let config = crate::config::get_config();

    if config.views.enable_tracking {
        if let Some(sink) = store.as_view_sink() {
            let counter = Arc::new(ViewCounter::new(
                sink,
                Duration::from_secs(config.views.flush_interval_secs),
                config.views.flush_threshold,
            ));

            set_global_view_counter(counter.clone());

            // Keep a strong reference inside the task so it outlives startup.
            let counter_for_task = counter.clone();
            tokio::spawn(async move {
                counter_for_task.start_background_task().await;
            });

            debug!(
                "ViewCounter initialized with {}s interval and {} views before flush",
                config.views.flush_interval_secs, config.views.flush_threshold
            );
        } else {
            warn!("View sink is not available, ViewCounter will not be initialized");
        }
    } else {
        warn!("View tracking is disabled in configuration");
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { store })
}
