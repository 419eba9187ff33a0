//! Marker registry: every marker shown on the map, in creation order.
//!
//! Catalog markers come first, followed by user-added and geolocated markers
//! in the order they were created. Records are never removed.

use storemap_core::{
    MarkerDetails, MarkerId, MarkerOrigin, MarkerRecord, Position, StoreCatalog,
    CUSTOM_MARKERS_CATEGORY, NO_LINK,
};

/// Title given to the device-location marker.
pub const GEOLOCATED_TITLE: &str = "Your Location";

/// Counts from a catalog build, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub markers: usize,
    /// Stores skipped because their location set was absent or empty.
    pub skipped_stores: usize,
    /// Locations dropped because their entry or position was malformed.
    pub skipped_locations: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    records: Vec<MarkerRecord>,
    geolocated: Option<MarkerId>,
}

impl MarkerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with one marker per catalog location.
    #[must_use]
    pub fn from_catalog(catalog: &StoreCatalog) -> (Self, BuildReport) {
        let mut registry = Self::new();
        let report = registry.build_from_catalog(catalog);
        (registry, report)
    }

    /// Append one marker per location of every store that has locations.
    ///
    /// Stores without locations are skipped with one warning each. A location
    /// whose entry or position is malformed is dropped with a warning and the
    /// rest of the batch continues.
    pub fn build_from_catalog(&mut self, catalog: &StoreCatalog) -> BuildReport {
        let mut report = BuildReport::default();

        for (category, store) in catalog.stores() {
            if !store.has_locations() {
                tracing::warn!(store = category, "no locations found for store; skipping");
                report.skipped_stores += 1;
                continue;
            }

            for (name, entry) in store.location_entries() {
                let location = match entry {
                    Ok(location) => location,
                    Err(err) => {
                        tracing::warn!(
                            store = category,
                            location = name,
                            error = %err,
                            "malformed location entry; skipping"
                        );
                        report.skipped_locations += 1;
                        continue;
                    }
                };

                let position = match location.position.normalize() {
                    Ok(position) => position,
                    Err(err) => {
                        tracing::warn!(
                            store = category,
                            location = name,
                            error = %err,
                            "invalid location position; skipping"
                        );
                        report.skipped_locations += 1;
                        continue;
                    }
                };

                self.push(|id| MarkerRecord {
                    id,
                    category: category.to_string(),
                    name: name.to_string(),
                    label: MarkerRecord::catalog_label(category, name),
                    position,
                    address: location.address.clone(),
                    link: location.link.clone().unwrap_or_else(|| NO_LINK.to_string()),
                    origin: MarkerOrigin::Catalog,
                    details: MarkerDetails::Store {
                        icon: store.icon.clone(),
                        message: store.message.clone(),
                        website: store.website.clone(),
                    },
                });
                report.markers += 1;
            }
        }

        tracing::debug!(
            markers = report.markers,
            skipped_stores = report.skipped_stores,
            skipped_locations = report.skipped_locations,
            "built markers from catalog"
        );
        report
    }

    /// Append a user-added marker from the add-marker form.
    pub fn add_user_marker(
        &mut self,
        title: &str,
        position: Position,
        address: &str,
        description: Option<&str>,
    ) -> &MarkerRecord {
        self.push(|id| MarkerRecord {
            id,
            category: CUSTOM_MARKERS_CATEGORY.to_string(),
            name: title.to_string(),
            label: title.to_string(),
            position,
            address: Some(address.to_string()),
            link: NO_LINK.to_string(),
            origin: MarkerOrigin::UserAdded,
            details: MarkerDetails::Custom {
                description: description.map(str::to_string),
            },
        })
    }

    /// Append the device-location marker once per session.
    ///
    /// Returns `None` when a geolocated marker already exists; repeated
    /// calls never add a second one.
    pub fn set_geolocated_marker(
        &mut self,
        position: Position,
        address: Option<String>,
    ) -> Option<&MarkerRecord> {
        if self.geolocated.is_some() {
            tracing::debug!("geolocated marker already present; ignoring");
            return None;
        }

        let record = self.push(|id| MarkerRecord {
            id,
            category: CUSTOM_MARKERS_CATEGORY.to_string(),
            name: GEOLOCATED_TITLE.to_string(),
            label: GEOLOCATED_TITLE.to_string(),
            position,
            address,
            link: NO_LINK.to_string(),
            origin: MarkerOrigin::Geolocated,
            details: MarkerDetails::Custom { description: None },
        });
        let id = record.id;
        self.geolocated = Some(id);
        self.get(id)
    }

    #[must_use]
    pub fn records(&self) -> &[MarkerRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&MarkerRecord> {
        self.records.get(id.0)
    }

    /// First marker whose `"lat,lng"` key matches.
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<&MarkerRecord> {
        self.records.iter().find(|r| r.key() == key)
    }

    #[must_use]
    pub fn geolocated(&self) -> Option<&MarkerRecord> {
        self.geolocated.and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push(&mut self, make: impl FnOnce(MarkerId) -> MarkerRecord) -> &MarkerRecord {
        let id = MarkerId(self.records.len());
        self.records.push(make(id));
        &self.records[id.0]
    }
}
