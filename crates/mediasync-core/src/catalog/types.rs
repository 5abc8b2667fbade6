//! Catalog nodes, browse pages and item metadata.

/// What a catalog node is. Containers report how many children they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Container { child_count: u32 },
    Item,
}

/// An entity seen while browsing. Lives only as long as the page it came in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogNode {
    pub id: String,
    pub title: String,
    pub kind: NodeKind,
}

impl CatalogNode {
    pub fn container(id: impl Into<String>, title: impl Into<String>, child_count: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::Container { child_count },
        }
    }

    pub fn item(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::Item,
        }
    }
}

/// One browse call: direct children of `container_id` starting at `start_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub container_id: String,
    pub start_index: u32,
    pub requested_count: u32,
}

impl PageRequest {
    pub fn first(container_id: impl Into<String>, requested_count: u32) -> Self {
        Self {
            container_id: container_id.into(),
            start_index: 0,
            requested_count,
        }
    }
}

/// Server answer to a [`PageRequest`].
///
/// `total_matches == 0` means the server did not say how many children exist,
/// not that the container is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowsePage {
    pub items: Vec<CatalogNode>,
    pub number_returned: u32,
    pub total_matches: u32,
}

/// One downloadable representation of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub url: String,
    /// Vendor profile tag (e.g. a DLNA profile for a resized rendition), if any.
    pub profile: Option<String>,
}

/// Result of resolving an item's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMetadata {
    pub title: String,
    pub resources: Vec<Resource>,
}

impl ItemMetadata {
    /// First resource without a profile tag: the original file. Tagged
    /// resources are derived renditions and never transfer sources.
    pub fn transfer_resource(&self) -> Option<&Resource> {
        self.resources.iter().find(|r| r.profile.is_none())
    }
}
