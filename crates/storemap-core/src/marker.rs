//! Marker records derived from the catalog or added during a session.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Category shared by every user-added and geolocated marker.
pub const CUSTOM_MARKERS_CATEGORY: &str = "Custom Markers";
/// Address used when a reverse lookup finds nothing.
pub const UNKNOWN_ADDRESS: &str = "Unknown address";
/// Link placeholder for markers without an external reference.
pub const NO_LINK: &str = "#";

/// Index of a record in the registry. Stable for the whole session because
/// records are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerOrigin {
    Catalog,
    UserAdded,
    Geolocated,
}

impl MarkerOrigin {
    /// `true` for markers listed under [`CUSTOM_MARKERS_CATEGORY`].
    #[must_use]
    pub fn is_custom(self) -> bool {
        !matches!(self, MarkerOrigin::Catalog)
    }
}

/// Content of the info popup opened from a marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerDetails {
    Store {
        icon: Option<String>,
        message: Option<String>,
        website: Option<String>,
    },
    Custom {
        description: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub id: MarkerId,
    pub category: String,
    /// Location name for catalog markers, the user's title otherwise.
    pub name: String,
    pub label: String,
    pub position: Position,
    pub address: Option<String>,
    pub link: String,
    pub origin: MarkerOrigin,
    pub details: MarkerDetails,
}

impl MarkerRecord {
    /// `"{category} - {name}"`, the title of a catalog marker.
    #[must_use]
    pub fn catalog_label(category: &str, name: &str) -> String {
        format!("{category} - {name}")
    }

    /// The route-selector value for this marker.
    #[must_use]
    pub fn key(&self) -> String {
        self.position.key()
    }

    /// Address text for display, falling back to [`UNKNOWN_ADDRESS`].
    #[must_use]
    pub fn display_address(&self) -> &str {
        self.address.as_deref().unwrap_or(UNKNOWN_ADDRESS)
    }

    #[must_use]
    pub fn has_link(&self) -> bool {
        self.link != NO_LINK
    }
}
