//! Record operations on the ledger, split into reads and writes.

mod read;
mod write;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::types::JobRecord;

fn record_from_row(row: &SqliteRow) -> JobRecord {
    JobRecord {
        id: row.get("id"),
        name: row.get("name"),
        url: row.get("url"),
        added_at: row.get("added_at"),
        tried_at: row.get("tried_at"),
        done_at: row.get("done_at"),
    }
}
