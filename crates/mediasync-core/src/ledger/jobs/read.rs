//! Record read operations: existence checks, get and list.

use anyhow::Result;

use super::super::db::Ledger;
use super::super::types::JobRecord;
use super::record_from_row;

impl Ledger {
    /// True if a record exists for `id`, whatever its completion state.
    /// This is the crawler's dedup gate.
    pub async fn has(&self, id: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM queue WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// True if a record exists for `id` and has been marked done.
    pub async fn is_done(&self, id: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM queue WHERE id = ?1 AND done_at IS NOT NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Fetch a single record.
    pub async fn get(&self, id: &str) -> Result<Option<JobRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, url, added_at, tried_at, done_at
            FROM queue
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(record_from_row))
    }

    /// List all records, most recently seen first.
    pub async fn list(&self) -> Result<Vec<JobRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, url, added_at, tried_at, done_at
            FROM queue
            ORDER BY added_at DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(record_from_row).collect())
    }
}
