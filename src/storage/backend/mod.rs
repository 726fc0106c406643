//! SeaORM storage backend
//!
//! Database storage using SeaORM, supporting SQLite, MySQL/MariaDB,
//! and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
mod view_sink;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{Result, ShortlnkError};
use crate::storage::{Link, LinkStore, NewLink};
use crate::views::ViewSink;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::model_to_link;

/// Infer the database type from the connection URL.
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(ShortlnkError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported URL schemes: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based link store.
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(ShortlnkError::database_config("DATABASE_URL is not set"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait::async_trait]
impl LinkStore for SeaOrmStorage {
    async fn find_by_hash(&self, hash: &str) -> Result<Option<Link>> {
        self.query_by_hash(hash).await
    }

    async fn count_by_url(&self, url: &str) -> Result<u64> {
        self.query_count_by_url(url).await
    }

    async fn insert(&self, link: NewLink) -> Result<Link> {
        self.insert_link(link).await
    }

    async fn backend_name(&self) -> String {
        self.backend_name.clone()
    }

    fn as_view_sink(&self) -> Option<Arc<dyn ViewSink>> {
        Some(Arc::new(self.clone()) as Arc<dyn ViewSink>)
    }
}
