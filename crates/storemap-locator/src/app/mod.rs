//! Application state: the single owner of everything the page shows.
//!
//! All mutation goes through `&mut self` methods, so updates are applied one
//! at a time and a provider response is applied when its request is awaited.
//! Every registry change regenerates the listing, the route options and the
//! filter visibility before the method returns.

mod command;
mod popup;

use serde::Serialize;
use storemap_core::{MarkerId, MarkerRecord, Position, StoreCatalog, UNKNOWN_ADDRESS};

use crate::filter::{self, filter_key_from_button_label, FilterState, Visibility};
use crate::listing::{self, Listing, ViewChange};
use crate::provider::{MapProvider, TravelMode};
use crate::registry::{BuildReport, MarkerRegistry};
use crate::route::{RouteError, RoutePhase, RouteSelection, Slot};

pub use command::Command;
pub use popup::{OpenPopup, PopupContent};

pub const INITIAL_CENTER: (f64, f64) = (43.271_914_280_548_835, -79.888_440_928_780_01);
pub const INITIAL_ZOOM: u8 = 11;

/// Current map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Position,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Position {
                lat: INITIAL_CENTER.0,
                lng: INITIAL_CENTER.1,
            },
            zoom: INITIAL_ZOOM,
        }
    }
}

impl MapView {
    /// Apply a view change; a missing zoom keeps the current one.
    pub fn apply(&mut self, change: ViewChange) {
        self.center = change.center;
        if let Some(zoom) = change.zoom {
            self.zoom = zoom;
        }
    }
}

#[derive(Debug)]
pub struct AppState<P> {
    provider: P,
    registry: MarkerRegistry,
    filter: FilterState,
    visibility: Vec<Visibility>,
    listing: Listing,
    route: RouteSelection,
    view: MapView,
    popup: Option<OpenPopup>,
    notifications: Vec<String>,
}

impl<P: MapProvider> AppState<P> {
    /// Empty state with no markers.
    pub fn new(provider: P) -> Self {
        let mut state = Self {
            provider,
            registry: MarkerRegistry::new(),
            filter: FilterState::default(),
            visibility: Vec::new(),
            listing: Listing::default(),
            route: RouteSelection::new(),
            view: MapView::default(),
            popup: None,
            notifications: Vec::new(),
        };
        state.refresh();
        state
    }

    /// Build markers from `catalog`, then wire up the views.
    pub fn with_catalog(provider: P, catalog: &StoreCatalog) -> (Self, BuildReport) {
        let mut state = Self::new(provider);
        let report = state.registry.build_from_catalog(catalog);
        state.refresh();
        tracing::info!(markers = report.markers, "application state ready");
        (state, report)
    }

    /// Regenerate every registry consumer.
    fn refresh(&mut self) {
        let records = self.registry.records();
        self.visibility = filter::apply(records, &self.filter);
        self.listing = listing::present(records);
        self.route.rebuild(records);
    }

    fn notify(&mut self, message: String) {
        tracing::info!(message = %message, "user notification");
        self.notifications.push(message);
    }

    pub fn set_filter(&mut self, key: &str) {
        self.filter = FilterState::new(key);
        self.visibility = filter::apply(self.registry.records(), &self.filter);
        tracing::debug!(
            filter = self.filter.key(),
            visible = self.visible_count(),
            "applied category filter"
        );
    }

    /// Filter from a button caption such as `"Show Bank Stores"`.
    pub fn press_filter_button(&mut self, label: &str) {
        let key = filter_key_from_button_label(label);
        self.set_filter(&key);
    }

    /// Re-center on the device position, resolve its address and add the
    /// geolocated marker if this session has none yet.
    pub async fn geolocate(&mut self, position: Position) -> Option<MarkerId> {
        self.view.center = position;

        let address = match self.provider.reverse_geocode(position).await {
            Ok(Some(address)) => {
                tracing::debug!(address = %address, "resolved nearest address");
                address
            }
            Ok(None) => UNKNOWN_ADDRESS.to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "reverse geocode failed");
                self.notify(format!(
                    "Geocode was not successful for the following reason: {}",
                    err.status_text()
                ));
                UNKNOWN_ADDRESS.to_string()
            }
        };

        let id = self
            .registry
            .set_geolocated_marker(position, Some(address))
            .map(|record| record.id)?;
        self.refresh();
        Some(id)
    }

    /// Geocode `address` and add a custom marker there. On failure a
    /// notification carrying the provider status is queued and nothing is added.
    pub async fn add_marker(
        &mut self,
        address: &str,
        title: &str,
        description: Option<&str>,
    ) -> Option<MarkerId> {
        let position = match self.provider.geocode(address).await {
            Ok(position) => position,
            Err(err) => {
                tracing::warn!(address, error = %err, "geocode failed");
                self.notify(format!(
                    "Geocode was not successful for the following reason: {}",
                    err.status_text()
                ));
                return None;
            }
        };

        self.view.center = position;
        let id = self
            .registry
            .add_user_marker(title, position, address, description)
            .id;
        self.refresh();
        Some(id)
    }

    /// Center on a listing entry at the focus zoom.
    pub fn focus(&mut self, id: MarkerId) -> Option<ViewChange> {
        let change = self.listing.entry(id)?.focus();
        self.view.apply(change);
        Some(change)
    }

    /// Open the popup for `id`, closing whichever one was open. Markers
    /// hidden by the filter cannot be opened.
    pub fn open_info(&mut self, id: MarkerId) -> Option<&OpenPopup> {
        if !self.is_visible(id) {
            tracing::debug!(marker = id.0, "ignoring popup request for hidden marker");
            return None;
        }
        let content = PopupContent::for_record(self.registry.get(id)?);
        self.popup = Some(OpenPopup {
            marker: id,
            content,
        });
        self.popup.as_ref()
    }

    /// Map background click.
    pub fn close_info(&mut self) {
        self.popup = None;
    }

    /// Select a route endpoint by `"lat,lng"` key.
    ///
    /// # Errors
    ///
    /// Returns the [`RouteError`] from the selector; it is also queued as a
    /// notification.
    pub fn select(&mut self, slot: Slot, key: Option<&str>) -> Result<(), RouteError> {
        if let Err(err) = self.route.select(slot, key) {
            self.notify(err.to_string());
            return Err(err);
        }
        Ok(())
    }

    /// Request driving directions between the selected endpoints.
    ///
    /// A missing endpoint queues a notification and issues no request.
    pub async fn request_route(&mut self) -> bool {
        let request = match self.route.begin_request() {
            Ok(request) => request,
            Err(err) => {
                self.notify(err.to_string());
                return false;
            }
        };

        match self
            .provider
            .directions(request.origin, request.destination, TravelMode::Driving)
            .await
        {
            Ok(route) => {
                tracing::info!(
                    summary = %route.summary,
                    meters = route.total_distance_meters(),
                    "route rendered"
                );
                self.route.complete(route);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "directions request failed");
                self.route.fail();
                self.notify(format!(
                    "Directions request failed due to {}",
                    err.status_text()
                ));
                false
            }
        }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn records(&self) -> &[MarkerRecord] {
        self.registry.records()
    }

    #[must_use]
    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn visibility(&self) -> &[Visibility] {
        &self.visibility
    }

    /// Records visible under the current filter.
    pub fn visible_records(&self) -> impl Iterator<Item = &MarkerRecord> {
        self.registry
            .records()
            .iter()
            .zip(&self.visibility)
            .filter(|(_, v)| v.visible)
            .map(|(record, _)| record)
    }

    /// Whether `id` names a marker shown under the current filter.
    #[must_use]
    pub fn is_visible(&self, id: MarkerId) -> bool {
        self.visibility.iter().any(|v| v.id == id && v.visible)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visibility.iter().filter(|v| v.visible).count()
    }

    #[must_use]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    #[must_use]
    pub fn route(&self) -> &RouteSelection {
        &self.route
    }

    #[must_use]
    pub fn route_phase(&self) -> RoutePhase {
        self.route.phase()
    }

    #[must_use]
    pub fn view(&self) -> MapView {
        self.view
    }

    #[must_use]
    pub fn popup(&self) -> Option<&OpenPopup> {
        self.popup.as_ref()
    }

    #[must_use]
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Drain queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }
}
