pub mod resolve;
pub mod shorten;

pub use resolve::{ResolveService, resolve_routes};
pub use shorten::{ShortenService, shorten_routes};
