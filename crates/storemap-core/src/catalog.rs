//! The store catalog as it appears in `location-info.json`.
//!
//! ```json
//! {
//!   "Pharmacy": {
//!     "icon": "img/pharmacy.png",
//!     "message": "Open late",
//!     "website": "https://example.com",
//!     "locations": {
//!       "Westdale": { "position": "43.25,-79.9", "address": "...", "link": "..." }
//!     }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{CoreError, Position};

/// All store categories in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreCatalog {
    stores: IndexMap<String, StoreDefinition>,
}

impl StoreCatalog {
    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the document is not an object of
    /// store definitions.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn new(stores: impl IntoIterator<Item = (String, StoreDefinition)>) -> Self {
        Self {
            stores: stores.into_iter().collect(),
        }
    }

    /// Iterate `(category, store)` pairs in document order.
    pub fn stores(&self) -> impl Iterator<Item = (&str, &StoreDefinition)> {
        self.stores.iter().map(|(name, store)| (name.as_str(), store))
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&StoreDefinition> {
        self.stores.get(category)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }
}

/// One store category with its display metadata and locations.
///
/// Locations are kept as raw JSON so one malformed entry can be skipped
/// without rejecting the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDefinition {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub locations: Option<IndexMap<String, serde_json::Value>>,
}

impl StoreDefinition {
    /// `true` when the store has a non-empty `locations` object.
    #[must_use]
    pub fn has_locations(&self) -> bool {
        self.locations.as_ref().is_some_and(|l| !l.is_empty())
    }

    /// Decode each location entry, yielding per-entry results in order.
    pub fn location_entries(
        &self,
    ) -> impl Iterator<Item = (&str, Result<LocationDefinition, serde_json::Error>)> {
        self.locations.iter().flatten().map(|(name, raw)| {
            (
                name.as_str(),
                LocationDefinition::deserialize(raw),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDefinition {
    pub position: RawPosition,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// A position as written in the catalog: either `"lat,lng"` or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPosition {
    Text(String),
    Coords { lat: f64, lng: f64 },
}

impl RawPosition {
    /// Normalize either form into a validated [`Position`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPosition`] for unparseable text or
    /// non-finite/out-of-range coordinates.
    pub fn normalize(&self) -> Result<Position, CoreError> {
        match self {
            RawPosition::Text(text) => text.parse(),
            RawPosition::Coords { lat, lng } => Position::new(*lat, *lng),
        }
    }
}
