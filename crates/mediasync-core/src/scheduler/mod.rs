//! Bounded-concurrency drain of the ledger into completed transfers.
//!
//! The scheduler keeps at most `limit` transfers in flight. It is woken by a
//! completed crawl pass, by new ledger records and by every finished transfer;
//! each wake posts a single [`Event::Drain`] which claims records until the
//! limit is reached or nothing is eligible.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::event::{Event, EventSender, Generation};
use crate::ledger::{JobRecord, Ledger};
use crate::transfer::{destination_path, staging_path, transfer_to, Fetcher, TransferError};

pub struct Scheduler {
    limit: usize,
    active: usize,
    /// A `Drain` event is queued and not yet handled. Further wakes are no-ops.
    drain_pending: bool,
    output_dir: PathBuf,
    fetcher: Arc<dyn Fetcher>,
    events: EventSender,
}

impl Scheduler {
    pub fn new(
        limit: usize,
        output_dir: impl Into<PathBuf>,
        fetcher: Arc<dyn Fetcher>,
        events: EventSender,
    ) -> Self {
        Self {
            limit: limit.max(1),
            active: 0,
            drain_pending: false,
            output_dir: output_dir.into(),
            fetcher,
            events,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Request a drain. Does nothing if one is already queued or every slot is busy;
    /// a finishing transfer wakes again.
    pub fn wake(&mut self) {
        if self.drain_pending || self.active >= self.limit {
            return;
        }
        self.drain_pending = true;
        let _ = self.events.send(Event::Drain);
    }

    /// Claim and start transfers until the limit is reached or the ledger has
    /// nothing eligible. `generation` is the current source session; without
    /// one nothing is started. Returns the number of transfers started.
    pub async fn drain(&mut self, ledger: &Ledger, generation: Option<Generation>) -> usize {
        self.drain_pending = false;
        let Some(generation) = generation else {
            tracing::debug!("drain skipped, no source present");
            return 0;
        };
        let mut started = 0;
        while self.active < self.limit {
            match ledger.select_next().await {
                Ok(Some(record)) => {
                    self.dispatch(generation, record);
                    started += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("could not claim next record: {:#}", e);
                    break;
                }
            }
        }
        if started > 0 {
            tracing::debug!(started, active = self.active, "drain");
        }
        started
    }

    fn dispatch(&mut self, generation: Generation, record: JobRecord) {
        self.active += 1;
        let staging = staging_path(&self.output_dir, &record.name);
        let destination = destination_path(&self.output_dir, &record.name);
        let fetcher = Arc::clone(&self.fetcher);
        let events = self.events.clone();
        tracing::debug!(id = %record.id, url = %record.url, "transfer started");
        tokio::spawn(async move {
            let result = transfer_to(fetcher.as_ref(), &record.url, &staging, &destination).await;
            let _ = events.send(Event::TransferFinished {
                generation,
                record,
                result,
            });
        });
    }

    /// Release the transfer's slot, record success and wake the drain loop.
    ///
    /// A promoted file is always marked done, whichever session started it; if
    /// the source has left meanwhile its row was flushed and the update is a
    /// no-op. A failed transfer takes no ledger action: its claim stamp stands,
    /// the staging file is left in place, and the record becomes eligible again
    /// once the lease window has passed.
    pub async fn on_transfer_finished(
        &mut self,
        ledger: &Ledger,
        generation: Generation,
        current: Option<Generation>,
        record: JobRecord,
        result: Result<u64, TransferError>,
    ) {
        self.active = self.active.saturating_sub(1);
        match result {
            Ok(bytes) => {
                if current != Some(generation) {
                    tracing::debug!(id = %record.id, generation, "transfer from an earlier session finished");
                }
                match ledger.mark_done(&record.id).await {
                    Ok(()) => tracing::info!("transferred {} ({} bytes)", record.name, bytes),
                    Err(e) => tracing::warn!(id = %record.id, "could not mark done: {:#}", e),
                }
            }
            Err(e) => tracing::warn!(id = %record.id, "transfer of {} failed: {}", record.name, e),
        }
        self.wake();
    }
}
