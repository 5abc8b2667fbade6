//! SQLite-backed ledger: connection, migrations, and timestamp helpers.
//!
//! Record reads and writes live in `jobs`.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Time-based rules applied by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerPolicy {
    /// A claimed, undone record is not handed out again before this has elapsed.
    pub lease_window: Duration,
    /// Records whose `added_at` is older than this are expired.
    pub retention: Duration,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            lease_window: Duration::from_secs(5 * 60),
            retention: Duration::from_secs(30 * 24 * 60 * 60),
        }
    }
}

/// Handle to the SQLite-backed job ledger. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct Ledger {
    pub(crate) pool: Pool<Sqlite>,
    pub(crate) policy: LedgerPolicy,
}

impl Ledger {
    /// Open (or create) the ledger at `path` and run migrations. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>, policy: LedgerPolicy) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;
        let ledger = Ledger { pool, policy };
        ledger.migrate().await?;
        tracing::debug!(path = %path.display(), "job ledger opened");
        Ok(ledger)
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    async fn migrate(&self) -> Result<()> {
        // `tried_at` is NULL until the scheduler first claims the record;
        // `done_at` is NULL until the transfer has been promoted to its final name.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS queue (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                added_at INTEGER NOT NULL,
                tried_at INTEGER,
                done_at INTEGER
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Current time as Unix seconds (for ledger timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Whole seconds of `d`, saturated into the i64 range used by the timestamp columns.
pub(crate) fn duration_secs(d: Duration) -> i64 {
    i64::try_from(d.as_secs()).unwrap_or(i64::MAX)
}

#[cfg(test)]
/// Open an in-memory ledger for tests (no disk I/O).
pub(crate) async fn open_memory(policy: LedgerPolicy) -> Result<Ledger> {
    // Single connection so the pool never hands back a different empty database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    let ledger = Ledger { pool, policy };
    ledger.migrate().await?;
    Ok(ledger)
}
