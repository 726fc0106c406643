//! ViewSink implementation for SeaOrmStorage
//!
//! Flushes buffered view counts in one batched UPDATE.
//!
//! # Security Note
//!
//! The statement is built through sea-query and executed with bound
//! parameters. Every hash is additionally validated via
//! `utils::is_short_hash()` as defense-in-depth against SQL injection.

use async_trait::async_trait;
use sea_orm::sea_query::{CaseStatement, Expr, Query};
use sea_orm::{ConnectionTrait, ExprTrait};
use tracing::debug;

use super::SeaOrmStorage;
use crate::utils::is_short_hash;
use crate::views::ViewSink;

use migration::entities::link;

#[async_trait]
impl ViewSink for SeaOrmStorage {
    async fn flush_views(&self, updates: Vec<(String, usize)>) -> anyhow::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }

        for (hash, _) in &updates {
            if !is_short_hash(hash) {
                anyhow::bail!(
                    "Invalid short hash format detected: '{}' - refusing to execute SQL",
                    hash
                );
            }
        }

        let total_count = updates.len();

        // CASE WHEN per hash, portable across backends.
        let mut case_stmt = CaseStatement::new();
        let mut hashes: Vec<String> = Vec::with_capacity(total_count);

        for (hash, count) in &updates {
            case_stmt = case_stmt.case(
                Expr::col(link::Column::Hash).eq(Expr::val(hash.as_str())),
                Expr::col(link::Column::Views).add(Expr::val(*count as i64)),
            );
            hashes.push(hash.clone());
        }
        case_stmt = case_stmt.finally(Expr::col(link::Column::Views));

        let stmt = Query::update()
            .table(link::Entity)
            .value(link::Column::Views, case_stmt)
            .and_where(Expr::col(link::Column::Hash).is_in(hashes))
            .to_owned();

        self.db
            .execute(&stmt)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to batch update view counts: {}", e))?;

        debug!(
            "View counts flushed to {} database ({} records)",
            self.backend_name.to_uppercase(),
            total_count
        );

        Ok(())
    }
}
