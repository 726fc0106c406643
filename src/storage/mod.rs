use std::sync::Arc;

use crate::errors::Result;
use crate::views::ViewSink;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{Link, NewLink};

/// Store of link records, injected into the HTTP handlers.
///
/// The store holds at most one record per distinct `url`, enforced by the
/// creator's count-then-insert sequence rather than a constraint; see
/// [`crate::api::services::shorten`] for the accepted race.
#[async_trait::async_trait]
pub trait LinkStore: Send + Sync {
    /// Look up a record by its short hash. Read errors propagate.
    async fn find_by_hash(&self, hash: &str) -> Result<Option<Link>>;

    /// Number of records whose `url` equals the input exactly
    /// (string equality, no normalization).
    async fn count_by_url(&self, url: &str) -> Result<u64>;

    /// Persist a new record and return it with its assigned identity.
    async fn insert(&self, link: NewLink) -> Result<Link>;

    async fn backend_name(&self) -> String;

    /// Sink for buffered view counts, if the backend supports it.
    fn as_view_sink(&self) -> Option<Arc<dyn ViewSink>> {
        None
    }
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = SeaOrmStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
