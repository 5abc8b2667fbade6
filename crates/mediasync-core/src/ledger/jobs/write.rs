//! Record write operations: upsert, refresh, claim, completion, expiry and reset.

use anyhow::Result;

use super::super::db::{duration_secs, unix_timestamp, Ledger};
use super::super::types::{JobRecord, RecordWrite};
use super::record_from_row;

impl Ledger {
    /// Replace-or-create the record for `id`. Always clears `done_at` and
    /// `tried_at`, so it must only be used for items the ledger does not know.
    pub async fn upsert(&self, id: &str, name: &str, url: &str) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO queue (id, name, url, added_at, tried_at, done_at)
            VALUES (?1, ?2, ?3, ?4, NULL, NULL)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(url)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Bump `added_at` on an existing record, leaving everything else alone.
    /// Returns whether a row existed.
    pub async fn refresh_timestamp(&self, id: &str) -> Result<bool> {
        let now = unix_timestamp();
        let r = sqlx::query("UPDATE queue SET added_at = ?1 WHERE id = ?2")
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected() > 0)
    }

    /// The crawler's only write path: refresh the record if present, otherwise
    /// create it. A completed record keeps its `done_at`, so the remote catalog
    /// still listing a file never triggers a second download.
    pub async fn refresh_or_append(&self, id: &str, name: &str, url: &str) -> Result<RecordWrite> {
        if self.refresh_timestamp(id).await? {
            return Ok(RecordWrite::Refreshed);
        }
        self.upsert(id, name, url).await?;
        Ok(RecordWrite::Appended)
    }

    /// Claim at most one eligible record and stamp its `tried_at` in the same
    /// statement. Eligible: not done, and never claimed or claimed at least one
    /// lease window ago. The stamp is the lease; nothing releases it early.
    pub async fn select_next(&self) -> Result<Option<JobRecord>> {
        let now = unix_timestamp();
        let lease_cutoff = now.saturating_sub(duration_secs(self.policy.lease_window));
        let row = sqlx::query(
            r#"
            UPDATE queue
            SET tried_at = ?1
            WHERE id = (
                SELECT id FROM queue
                WHERE done_at IS NULL
                  AND (tried_at IS NULL OR tried_at <= ?2)
                ORDER BY added_at ASC, id ASC
                LIMIT 1
            )
              AND done_at IS NULL
            RETURNING id, name, url, added_at, tried_at, done_at
            "#,
        )
        .bind(now)
        .bind(lease_cutoff)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(record_from_row))
    }

    /// Stamp `done_at` on the record. Idempotent: the first stamp is kept.
    pub async fn mark_done(&self, id: &str) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query("UPDATE queue SET done_at = ?1 WHERE id = ?2 AND done_at IS NULL")
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete records not seen within the retention horizon, done or not.
    /// Returns the number of records removed.
    pub async fn expire(&self) -> Result<u64> {
        let cutoff = unix_timestamp().saturating_sub(duration_secs(self.policy.retention));
        let r = sqlx::query("DELETE FROM queue WHERE added_at < ?1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected())
    }

    /// Delete every record that is not done, discarding outstanding leases.
    /// Completed records are untouched. Returns the number of records removed.
    pub async fn flush_undone(&self) -> Result<u64> {
        let r = sqlx::query("DELETE FROM queue WHERE done_at IS NULL")
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected())
    }

    /// Permanently remove one record so the item is treated as new on the next crawl.
    /// Returns whether a row existed.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let r = sqlx::query("DELETE FROM queue WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected() > 0)
    }
}
