//! Listing presenter: markers grouped by category for the side panel.
//!
//! The listing is rebuilt from scratch after every registry change.

use serde::Serialize;
use storemap_core::{MarkerId, MarkerRecord, Position, CUSTOM_MARKERS_CATEGORY};

/// Zoom level applied when an entry is focused.
pub const FOCUS_ZOOM: u8 = 14;

/// A requested change to the map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewChange {
    pub center: Position,
    pub zoom: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingEntry {
    pub id: MarkerId,
    pub name: String,
    pub label: String,
    pub position: Position,
    pub address: String,
    pub link: String,
}

impl ListingEntry {
    /// Re-center on this entry at [`FOCUS_ZOOM`].
    #[must_use]
    pub fn focus(&self) -> ViewChange {
        ViewChange {
            center: self.position,
            zoom: Some(FOCUS_ZOOM),
        }
    }

    /// Link target for the address, `None` for the `"#"` placeholder.
    #[must_use]
    pub fn address_href(&self) -> Option<&str> {
        (self.link != storemap_core::NO_LINK).then_some(self.link.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub entries: Vec<ListingEntry>,
}

impl CategoryGroup {
    /// `"Bank (1 Location)"` / `"Bank (3 Locations)"`.
    #[must_use]
    pub fn heading(&self) -> String {
        let count = self.entries.len();
        let noun = if count == 1 { "Location" } else { "Locations" };
        format!("{} ({count} {noun})", self.category)
    }

    /// Element id for the collapsible section: category without whitespace.
    #[must_use]
    pub fn collapse_id(&self) -> String {
        let compact: String = self
            .category
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!("collapse-{compact}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    pub groups: Vec<CategoryGroup>,
}

impl Listing {
    #[must_use]
    pub fn group(&self, category: &str) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.category == category)
    }

    /// Find an entry by marker id across all groups.
    #[must_use]
    pub fn entry(&self, id: MarkerId) -> Option<&ListingEntry> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .find(|e| e.id == id)
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// Group records by category in first-appearance order, keeping record order
/// within each group. Custom records all land in [`CUSTOM_MARKERS_CATEGORY`].
#[must_use]
pub fn present(records: &[MarkerRecord]) -> Listing {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for record in records {
        let category = if record.origin.is_custom() {
            CUSTOM_MARKERS_CATEGORY
        } else {
            record.category.as_str()
        };

        let entry = ListingEntry {
            id: record.id,
            name: record.name.clone(),
            label: record.label.clone(),
            position: record.position,
            address: record.display_address().to_string(),
            link: record.link.clone(),
        };

        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.entries.push(entry),
            None => groups.push(CategoryGroup {
                category: category.to_string(),
                entries: vec![entry],
            }),
        }
    }

    Listing { groups }
}
