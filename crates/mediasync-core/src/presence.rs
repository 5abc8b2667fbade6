//! Presence events from the discovery collaborator.

use std::fmt;
use std::sync::Arc;

use crate::catalog::CatalogSource;

/// A media server appeared on or left the network.
pub enum PresenceEvent {
    Available {
        name: String,
        source: Arc<dyn CatalogSource>,
    },
    Unavailable {
        name: String,
    },
}

impl PresenceEvent {
    /// Announced friendly name, trimmed of surrounding whitespace.
    pub fn name(&self) -> &str {
        match self {
            PresenceEvent::Available { name, .. } | PresenceEvent::Unavailable { name } => {
                name.trim()
            }
        }
    }
}

impl fmt::Debug for PresenceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenceEvent::Available { name, .. } => {
                f.debug_struct("Available").field("name", name).finish()
            }
            PresenceEvent::Unavailable { name } => {
                f.debug_struct("Unavailable").field("name", name).finish()
            }
        }
    }
}
