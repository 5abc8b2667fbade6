//! Remote catalog model and the collaborator that browses it.
//!
//! The wire protocol (ContentDirectory Browse over SOAP, DIDL-Lite parsing)
//! lives behind [`CatalogSource`]; the crawler only sees the types below.

mod source;
mod types;

pub use source::{CatalogError, CatalogSource, ROOT_CONTAINER_ID};
pub use types::{BrowsePage, CatalogNode, ItemMetadata, NodeKind, PageRequest, Resource};
