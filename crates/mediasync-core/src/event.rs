//! Completion events posted back to the engine task.
//!
//! Every network operation runs as a spawned task whose only side effect is
//! sending one of these; the engine handles them one at a time.

use tokio::sync::mpsc;

use crate::catalog::{BrowsePage, CatalogError, ItemMetadata, PageRequest};
use crate::ledger::JobRecord;
use crate::transfer::TransferError;

/// Identifies one presence session of the source. Completions carrying an
/// older generation belong to a departed source and are discarded.
pub type Generation = u64;

#[derive(Debug)]
pub enum Event {
    PageFetched {
        generation: Generation,
        request: PageRequest,
        result: Result<BrowsePage, CatalogError>,
    },
    ItemResolved {
        generation: Generation,
        item_id: String,
        result: Result<ItemMetadata, CatalogError>,
    },
    RecrawlDue {
        generation: Generation,
    },
    /// Run the scheduler's drain loop.
    Drain,
    TransferFinished {
        generation: Generation,
        record: JobRecord,
        result: Result<u64, TransferError>,
    },
}

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

