//! The catalog collaborator trait and its error type.

use async_trait::async_trait;

use super::types::{BrowsePage, ItemMetadata, PageRequest};

/// Object id of the ContentDirectory root container.
pub const ROOT_CONTAINER_ID: &str = "0";

/// Failure reported by a catalog source.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Request could not be completed (connection, timeout, SOAP fault).
    #[error("catalog request failed: {0}")]
    Transport(String),
    /// Response arrived but could not be understood.
    #[error("malformed catalog response: {0}")]
    Malformed(String),
}

/// A browsable media server. One handle per present device.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Container the crawl starts from.
    fn catalog_root(&self) -> String {
        ROOT_CONTAINER_ID.to_string()
    }

    /// Browse one page of direct children.
    async fn list_page(&self, request: &PageRequest) -> Result<BrowsePage, CatalogError>;

    /// Fetch title and resources of a single item.
    async fn resolve_item(&self, item_id: &str) -> Result<ItemMetadata, CatalogError>;
}
