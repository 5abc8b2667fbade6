//! Scripted catalog and fetcher doubles shared by crawler, scheduler and engine tests.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::{
    BrowsePage, CatalogError, CatalogNode, CatalogSource, ItemMetadata, PageRequest, Resource,
};
use crate::transfer::{Fetcher, TransferError};

/// In-memory catalog tree. Unknown containers are empty.
#[derive(Default)]
pub(crate) struct FakeSource {
    containers: HashMap<String, Vec<CatalogNode>>,
    items: HashMap<String, ItemMetadata>,
    failing: HashSet<String>,
    hide_totals: bool,
    page_delay: Duration,
    pub list_calls: AtomicUsize,
    pub resolve_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(mut self, id: &str, children: Vec<CatalogNode>) -> Self {
        self.containers.insert(id.to_string(), children);
        self
    }

    /// Registers metadata for `id` with one untagged resource at `url`.
    pub fn item(mut self, id: &str, title: &str, url: &str) -> Self {
        self.items.insert(
            id.to_string(),
            ItemMetadata {
                title: title.to_string(),
                resources: vec![
                    Resource {
                        url: format!("{url}?thumb"),
                        profile: Some("JPEG_TN".to_string()),
                    },
                    Resource {
                        url: url.to_string(),
                        profile: None,
                    },
                ],
            },
        );
        self
    }

    pub fn tagged_only(mut self, id: &str, title: &str) -> Self {
        self.items.insert(
            id.to_string(),
            ItemMetadata {
                title: title.to_string(),
                resources: vec![Resource {
                    url: "http://cam/resized".to_string(),
                    profile: Some("JPEG_SM".to_string()),
                }],
            },
        );
        self
    }

    pub fn fail_container(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    /// Report `total_matches = 0` on every page.
    pub fn hide_totals(mut self) -> Self {
        self.hide_totals = true;
        self
    }

    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn resolves(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn list_page(&self, request: &PageRequest) -> Result<BrowsePage, CatalogError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if !self.page_delay.is_zero() {
            tokio::time::sleep(self.page_delay).await;
        }
        if self.failing.contains(&request.container_id) {
            return Err(CatalogError::Transport("connection reset".to_string()));
        }
        let children = self
            .containers
            .get(&request.container_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let start = (request.start_index as usize).min(children.len());
        let end = (start + request.requested_count as usize).min(children.len());
        let items = children[start..end].to_vec();
        Ok(BrowsePage {
            number_returned: items.len() as u32,
            total_matches: if self.hide_totals {
                0
            } else {
                children.len() as u32
            },
            items,
        })
    }

    async fn resolve_item(&self, item_id: &str) -> Result<ItemMetadata, CatalogError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.items
            .get(item_id)
            .cloned()
            .ok_or_else(|| CatalogError::Malformed(format!("no such object {item_id}")))
    }
}

/// Writes the URL itself as the body. URLs in `failing` write a partial body
/// and then fail with HTTP 500.
#[derive(Default)]
pub(crate) struct FakeFetcher {
    delay: Duration,
    failing: Mutex<HashSet<String>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn fail(&self, url: &str) {
        self.failing.lock().unwrap().insert(url.to_string());
    }

    pub fn heal(&self, url: &str) {
        self.failing.lock().unwrap().remove(url);
    }

    pub fn peak(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str, staging: &Path) -> Result<u64, TransferError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.fetched.lock().unwrap().push(url.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let failing = self.failing.lock().unwrap().contains(url);
        let result = if failing {
            tokio::fs::write(staging, b"partial").await?;
            Err(TransferError::Http(500))
        } else {
            tokio::fs::write(staging, url.as_bytes()).await?;
            Ok(url.len() as u64)
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
