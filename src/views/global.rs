use std::sync::{Arc, OnceLock};
use tracing::trace;

use super::manager::ViewCounter;

pub static GLOBAL_VIEW_COUNTER: OnceLock<Arc<ViewCounter>> = OnceLock::new();

/// Install the global view counter. Panics on a second call.
pub fn set_global_view_counter(counter: Arc<ViewCounter>) {
    if GLOBAL_VIEW_COUNTER.set(counter).is_err() {
        panic!("GLOBAL_VIEW_COUNTER has already been set");
    }
}

/// Global view counter, if view tracking was enabled at startup.
pub fn get_view_counter() -> Option<&'static Arc<ViewCounter>> {
    match GLOBAL_VIEW_COUNTER.get() {
        Some(counter) => Some(counter),
        None => {
            trace!("GLOBAL_VIEW_COUNTER has not been initialized yet");
            None
        }
    }
}
