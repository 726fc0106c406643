pub mod global;
pub mod manager;
pub mod sink;

pub use global::{get_view_counter, set_global_view_counter};
pub use manager::ViewCounter;
pub use sink::ViewSink;
