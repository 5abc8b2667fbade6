//! Durable job ledger (SQLite via sqlx).
//!
//! One row per catalog item ever queued: where to fetch it, what to call it,
//! when it was last seen, claimed, and completed. The ledger provides the
//! crawler's dedup gate and the scheduler's lease-based claim.

mod db;
mod jobs;
mod types;

pub use db::{Ledger, LedgerPolicy};
pub use types::{JobRecord, RecordState, RecordWrite};

#[cfg(test)]
pub(crate) use db::open_memory;
