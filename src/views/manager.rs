//! View counter
//!
//! Collects per-hash view counts off the request path and flushes them to a
//! [`ViewSink`] in batches:
//! - lock-free increments (DashMap)
//! - interval flush from a background task
//! - threshold-triggered flush under load
//!
//! A flush failure restores the drained counts to the buffer and is only
//! logged; it never reaches a caller.

use dashmap::DashMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};
use tracing::{debug, trace, warn};

use crate::views::ViewSink;

struct ViewBuffer {
    /// Per-hash counts since the last flush.
    data: DashMap<Arc<str>, usize>,
    /// Total buffered views, for the threshold check.
    total_views: AtomicUsize,
    /// Flush lock, prevents concurrent flushes.
    flush_lock: Mutex<()>,
    /// Whether a threshold flush has already been spawned.
    flush_pending: AtomicBool,
}

impl ViewBuffer {
    fn new() -> Self {
        Self {
            data: DashMap::new(),
            total_views: AtomicUsize::new(0),
            flush_lock: Mutex::new(()),
            flush_pending: AtomicBool::new(false),
        }
    }

    fn increment(&self, key: &str) -> usize {
        // Hot hashes hit the get_mut path without allocating a new Arc.
        if let Some(mut entry) = self.data.get_mut(key) {
            *entry += 1;
        } else {
            // TOCTOU window here only costs an extra Arc allocation.
            self.data
                .entry(Arc::from(key))
                .and_modify(|v| *v += 1)
                .or_insert(1);
        }
        trace!("ViewBuffer: incremented {}", key);

        self.total_views.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Collect all updates and clear the buffer. Removes key by key from a
    /// snapshot so increments landing mid-drain are kept for the next flush.
    fn drain(&self) -> Vec<(String, usize)> {
        let keys: Vec<Arc<str>> = self.data.iter().map(|r| r.key().clone()).collect();

        let mut updates = Vec::with_capacity(keys.len());
        let mut total_removed = 0;
        for key in keys {
            if let Some((k, v)) = self.data.remove(&key) {
                total_removed += v;
                updates.push((k.to_string(), v));
            }
        }

        if total_removed > 0 {
            self.total_views
                .fetch_update(Ordering::Release, Ordering::Relaxed, |current| {
                    Some(current.saturating_sub(total_removed))
                })
                .ok();
        }

        updates
    }

    /// Put drained counts back after a failed flush.
    fn restore(&self, updates: Vec<(String, usize)>) {
        let mut restored_total = 0;
        for (k, v) in updates {
            *self.data.entry(Arc::from(k.as_str())).or_insert(0) += v;
            restored_total += v;
        }
        self.total_views.fetch_add(restored_total, Ordering::Relaxed);
    }

    fn total(&self) -> usize {
        self.total_views.load(Ordering::Relaxed)
    }
}

/// Buffered view counter.
///
/// State is fully encapsulated so tests can run multiple instances.
#[derive(Clone)]
pub struct ViewCounter {
    buffer: Arc<ViewBuffer>,
    sink: Arc<dyn ViewSink>,
    flush_interval: Duration,
    /// Buffered view count that triggers an early flush.
    flush_threshold: usize,
}

impl ViewCounter {
    pub fn new(sink: Arc<dyn ViewSink>, flush_interval: Duration, flush_threshold: usize) -> Self {
        Self {
            buffer: Arc::new(ViewBuffer::new()),
            sink,
            flush_interval,
            flush_threshold,
        }
    }

    /// Record one view (thread-safe, lock-free).
    pub fn increment(&self, hash: &str) {
        let current_size = self.buffer.increment(hash);
        trace!("ViewCounter: buffered views: {}", current_size);

        if current_size >= self.flush_threshold {
            // compare_exchange so only one thread spawns the flush task.
            if self
                .buffer
                .flush_pending
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
                .is_ok()
            {
                let buffer = Arc::clone(&self.buffer);
                let sink = Arc::clone(&self.sink);
                tokio::spawn(async move {
                    if let Ok(_guard) = buffer.flush_lock.try_lock() {
                        Self::flush_buffer(&buffer, &sink).await;
                    } else {
                        trace!("ViewCounter: flush already in progress, skipping");
                    }
                    buffer.flush_pending.store(false, Ordering::Release);
                });
            }
        }
    }

    /// Periodic flush loop; run as a detached background task.
    pub async fn start_background_task(&self) {
        loop {
            sleep(self.flush_interval).await;

            debug!("ViewCounter: triggering scheduled flush");
            if let Ok(_guard) = self.buffer.flush_lock.try_lock() {
                Self::flush_buffer(&self.buffer, &self.sink).await;
            } else {
                trace!("ViewCounter: flush already in progress, skipping scheduled flush");
            }
        }
    }

    /// Flush now, waiting for any in-flight flush first. Used on shutdown
    /// and by tests that assert on persisted counts.
    pub async fn flush(&self) {
        debug!("ViewCounter: manual flush triggered");
        let _guard = self.buffer.flush_lock.lock().await;
        Self::flush_buffer(&self.buffer, &self.sink).await;
    }

    async fn flush_buffer(buffer: &ViewBuffer, sink: &Arc<dyn ViewSink>) {
        let updates = buffer.drain();

        if updates.is_empty() {
            trace!("ViewCounter: no views to flush");
            return;
        }

        let count = updates.len();
        match sink.flush_views(updates.clone()).await {
            Ok(_) => {
                debug!("ViewCounter: flushed {} entries", count);
            }
            Err(e) => {
                buffer.restore(updates);
                warn!(
                    "ViewCounter: flush_views failed: {}, {} entries restored to buffer",
                    e, count
                );
            }
        }
    }

    /// Total buffered views (for monitoring and tests).
    pub fn buffer_size(&self) -> usize {
        self.buffer.total()
    }
}
