//! Pagination continuation and per-node decisions.

use crate::catalog::{BrowsePage, CatalogNode, NodeKind, PageRequest};

/// Request for the next page of the same container, or `None` once the
/// container is exhausted.
///
/// Paging continues while the last page was non-empty and either more
/// children remain or the server reported a total of zero. A zero total is
/// read as "unknown", so such containers are paged until an empty page.
pub fn next_page(request: &PageRequest, page: &BrowsePage, max_page_size: u32) -> Option<PageRequest> {
    if page.number_returned == 0 {
        return None;
    }
    let consumed = i64::from(request.start_index) + i64::from(page.number_returned);
    let remaining = i64::from(page.total_matches) - consumed;
    if remaining <= 0 && page.total_matches != 0 {
        return None;
    }
    let requested_count = if remaining > 0 {
        remaining.min(i64::from(max_page_size)) as u32
    } else {
        max_page_size
    };
    Some(PageRequest {
        container_id: request.container_id.clone(),
        start_index: request.start_index.saturating_add(page.number_returned),
        requested_count,
    })
}

/// What the crawler does with one node of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeAction {
    /// Browse the container's children as a new branch.
    Descend(PageRequest),
    /// Empty container; nothing to do.
    Skip,
    /// Leaf item; check the ledger and resolve it if unknown.
    Inspect,
}

pub fn node_action(node: &CatalogNode, max_page_size: u32) -> NodeAction {
    match node.kind {
        NodeKind::Container { child_count: 0 } => NodeAction::Skip,
        NodeKind::Container { .. } => {
            NodeAction::Descend(PageRequest::first(node.id.clone(), max_page_size))
        }
        NodeKind::Item => NodeAction::Inspect,
    }
}
