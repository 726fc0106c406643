//! Write database operations.

use sea_orm::ActiveModelTrait;
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_link, new_link_to_active_model};
use crate::errors::{Result, ShortlnkError};
use crate::storage::{Link, NewLink};

impl SeaOrmStorage {
    pub(super) async fn insert_link(&self, link: NewLink) -> Result<Link> {
        let active = new_link_to_active_model(&link);

        // insert() resolves the assigned identity; a failure here is the
        // "unconfirmed insert" case and surfaces as a storage error.
        let model = active.insert(&self.db).await.map_err(|e| {
            ShortlnkError::database_operation(format!("Link insert failed: {}", e))
        })?;

        info!("Link created: {} -> {}", model.hash, model.url);
        Ok(model_to_link(model))
    }
}
