//! Types stored in and returned by the job ledger.

/// One durable unit of work: a catalog item to mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    /// Catalog item id; unique across the ledger.
    pub id: String,
    /// Destination file name inside the output directory.
    pub name: String,
    /// Transfer source.
    pub url: String,
    /// Last time the crawler saw the item (Unix seconds).
    pub added_at: i64,
    /// Last time the scheduler claimed the record, if ever.
    pub tried_at: Option<i64>,
    /// When the transfer completed, if it has.
    pub done_at: Option<i64>,
}

impl JobRecord {
    pub fn state(&self) -> RecordState {
        match (self.done_at, self.tried_at) {
            (Some(_), _) => RecordState::Done,
            (None, Some(_)) => RecordState::Claimed,
            (None, None) => RecordState::Queued,
        }
    }
}

/// Display state derived from the timestamps of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Never claimed.
    Queued,
    /// Claimed at least once and not done (in flight, or waiting out its lease).
    Claimed,
    Done,
}

impl RecordState {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordState::Queued => "queued",
            RecordState::Claimed => "claimed",
            RecordState::Done => "done",
        }
    }
}

/// What `refresh_or_append` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordWrite {
    /// The record existed; only `added_at` moved.
    Refreshed,
    /// A new undone record was created.
    Appended,
}
