//! Category filter over the marker registry.

use storemap_core::{MarkerId, MarkerRecord};

/// Filter key that shows every marker, matched case-insensitively.
pub const ALL_CATEGORIES: &str = "all";

/// The current filter selection. Starts at "all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    key: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            key: ALL_CATEGORIES.to_string(),
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: key.trim().to_string(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.key.eq_ignore_ascii_case(ALL_CATEGORIES)
    }

    /// Case-insensitive category match, or always `true` for "all".
    #[must_use]
    pub fn matches(&self, record: &MarkerRecord) -> bool {
        self.is_all() || record.category.to_lowercase() == self.key.to_lowercase()
    }
}

/// Visibility of one record under a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub id: MarkerId,
    pub visible: bool,
}

/// Mark every record visible or hidden under `filter`. Records are not
/// mutated; the result lines up with `records` index for index.
#[must_use]
pub fn apply(records: &[MarkerRecord], filter: &FilterState) -> Vec<Visibility> {
    records
        .iter()
        .map(|record| Visibility {
            id: record.id,
            visible: filter.matches(record),
        })
        .collect()
}

/// Derive a filter key from a button caption such as `"Show Pharmacy Stores"`.
#[must_use]
pub fn filter_key_from_button_label(label: &str) -> String {
    let trimmed = label.trim();
    let without_prefix = trimmed.strip_prefix("Show ").unwrap_or(trimmed);
    let without_suffix = without_prefix
        .strip_suffix(" Stores")
        .unwrap_or(without_prefix);
    without_suffix.trim().to_string()
}
