//! Recursive paginated browse of one present source.
//!
//! Each page fetch is a branch. Branches are spawned tasks that post their
//! result back as [`Event::PageFetched`]; the engine hands the result to
//! [`Crawler::handle_page`], which settles the branch and may start more.
//! When the last outstanding branch settles the pass is complete.

mod paging;
mod state;

pub use paging::{next_page, node_action, NodeAction};
pub use state::CrawlState;

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{BrowsePage, CatalogError, CatalogSource, ItemMetadata, PageRequest};
use crate::event::{Event, EventSender, Generation};
use crate::ledger::{Ledger, RecordWrite};
use crate::naming::destination_name;

/// Crawl session for one presence of the source. Dropping it aborts the
/// re-crawl timer; page fetches already in flight still complete and are
/// recognised as stale by their generation.
pub struct Crawler {
    name: String,
    source: Arc<dyn CatalogSource>,
    generation: Generation,
    events: EventSender,
    max_page_size: u32,
    recrawl_interval: Duration,
    state: CrawlState,
}

impl Crawler {
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn CatalogSource>,
        generation: Generation,
        events: EventSender,
        max_page_size: u32,
        recrawl_interval: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            generation,
            events,
            max_page_size: max_page_size.max(1),
            recrawl_interval,
            state: CrawlState::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Browse the catalog from its root.
    pub fn start_pass(&mut self) {
        tracing::debug!("crawl pass started on {}", self.name);
        let root = self.source.catalog_root();
        self.crawl(PageRequest::first(root, self.max_page_size));
    }

    /// Issue one page fetch as a new branch.
    pub fn crawl(&mut self, request: PageRequest) {
        self.state.branch_started();
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = source.list_page(&request).await;
            let _ = events.send(Event::PageFetched {
                generation,
                request,
                result,
            });
        });
    }

    /// Settle one branch. Returns true when this was the last outstanding
    /// branch, i.e. the pass is complete.
    pub async fn handle_page(
        &mut self,
        ledger: &Ledger,
        request: PageRequest,
        result: Result<BrowsePage, CatalogError>,
    ) -> bool {
        self.state.branch_finished();
        match result {
            Ok(page) => {
                tracing::debug!(
                    container = %request.container_id,
                    start = request.start_index,
                    returned = page.number_returned,
                    total = page.total_matches,
                    "page fetched"
                );
                for node in &page.items {
                    match node_action(node, self.max_page_size) {
                        NodeAction::Descend(child) => self.crawl(child),
                        NodeAction::Skip => {}
                        NodeAction::Inspect => self.inspect(ledger, &node.id).await,
                    }
                }
                if let Some(next) = next_page(&request, &page, self.max_page_size) {
                    self.crawl(next);
                }
            }
            Err(e) => tracing::warn!(
                container = %request.container_id,
                start = request.start_index,
                "browse failed: {}",
                e
            ),
        }
        self.state.is_idle()
    }

    async fn inspect(&self, ledger: &Ledger, item_id: &str) {
        match ledger.has(item_id).await {
            Ok(true) => tracing::debug!(item = item_id, "already in ledger"),
            Ok(false) => self.resolve(item_id.to_string()),
            Err(e) => {
                tracing::warn!(item = item_id, "ledger lookup failed: {:#}", e);
                self.resolve(item_id.to_string());
            }
        }
    }

    fn resolve(&self, item_id: String) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = source.resolve_item(&item_id).await;
            let _ = events.send(Event::ItemResolved {
                generation,
                item_id,
                result,
            });
        });
    }

    /// Record a resolved item. Returns true when the ledger gained or
    /// refreshed a record.
    pub async fn handle_resolved(
        &self,
        ledger: &Ledger,
        item_id: &str,
        result: Result<ItemMetadata, CatalogError>,
    ) -> bool {
        let meta = match result {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!(item = item_id, "metadata request failed: {}", e);
                return false;
            }
        };
        let Some(resource) = meta.transfer_resource() else {
            tracing::debug!(item = item_id, "no original resource, skipping");
            return false;
        };
        let name = destination_name(&meta.title, &resource.url, item_id);
        match ledger.refresh_or_append(item_id, &name, &resource.url).await {
            Ok(RecordWrite::Appended) => {
                tracing::info!("queued {} as {}", item_id, name);
                true
            }
            Ok(RecordWrite::Refreshed) => true,
            Err(e) => {
                tracing::warn!(item = item_id, "could not record item: {:#}", e);
                false
            }
        }
    }

    /// Arm the one-shot re-crawl timer. No-op while armed or while branches
    /// are outstanding.
    pub fn arm_recrawl(&mut self) -> bool {
        let events = self.events.clone();
        let generation = self.generation;
        let interval = self.recrawl_interval;
        self.state.arm_recrawl(|| {
            tokio::spawn(async move {
                tokio::time::sleep(interval).await;
                let _ = events.send(Event::RecrawlDue { generation });
            })
        })
    }

    /// The re-crawl timer fired: start a new pass unless one is running.
    pub fn on_recrawl_due(&mut self) {
        self.state.recrawl_fired();
        if self.state.is_idle() {
            self.start_pass();
        } else {
            tracing::debug!("re-crawl skipped, pass still running on {}", self.name);
        }
    }

    pub fn cancel_recrawl(&mut self) {
        self.state.cancel_recrawl();
    }
}
