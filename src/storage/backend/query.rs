//! Read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use super::SeaOrmStorage;
use super::converters::model_to_link;
use crate::errors::{Result, ShortlnkError};
use crate::storage::Link;

use migration::entities::link;

impl SeaOrmStorage {
    pub(super) async fn query_by_hash(&self, hash: &str) -> Result<Option<Link>> {
        let model = link::Entity::find()
            .filter(link::Column::Hash.eq(hash))
            .one(&self.db)
            .await
            .map_err(|e| {
                ShortlnkError::database_operation(format!("Link lookup failed: {}", e))
            })?;

        Ok(model.map(model_to_link))
    }

    pub(super) async fn query_count_by_url(&self, url: &str) -> Result<u64> {
        link::Entity::find()
            .filter(link::Column::Url.eq(url))
            .count(&self.db)
            .await
            .map_err(|e| ShortlnkError::database_operation(format!("Url count failed: {}", e)))
    }
}
