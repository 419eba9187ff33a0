//! End-to-end flows through `AppState` with a scripted map provider.

use std::sync::atomic::{AtomicUsize, Ordering};

use storemap_core::{MarkerId, MarkerOrigin, Position, StoreCatalog, UNKNOWN_ADDRESS};
use storemap_locator::{
    AppState, Command, MapProvider, PopupContent, ProviderError, Route, RoutePhase, Slot,
    TravelMode, GEOLOCATED_TITLE,
};

/// Map provider returning canned answers and counting every call.
#[derive(Default)]
struct FakeProvider {
    geocode_result: Option<Position>,
    geocode_status: Option<&'static str>,
    reverse_address: Option<&'static str>,
    reverse_status: Option<&'static str>,
    directions_status: Option<&'static str>,
    geocode_calls: AtomicUsize,
    reverse_calls: AtomicUsize,
    directions_calls: AtomicUsize,
}

impl FakeProvider {
    fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

impl MapProvider for FakeProvider {
    async fn geocode(&self, _address: &str) -> Result<Position, ProviderError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        match (self.geocode_result, self.geocode_status) {
            (Some(position), _) => Ok(position),
            (None, status) => Err(ProviderError::Status(
                status.unwrap_or("ZERO_RESULTS").to_string(),
            )),
        }
    }

    async fn reverse_geocode(&self, _position: Position) -> Result<Option<String>, ProviderError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        match self.reverse_status {
            Some(status) => Err(ProviderError::Status(status.to_string())),
            None => Ok(self.reverse_address.map(str::to_string)),
        }
    }

    async fn directions(
        &self,
        _origin: Position,
        _destination: Position,
        mode: TravelMode,
    ) -> Result<Route, ProviderError> {
        assert_eq!(mode, TravelMode::Driving);
        self.directions_calls.fetch_add(1, Ordering::SeqCst);
        match self.directions_status {
            Some(status) => Err(ProviderError::Status(status.to_string())),
            None => Ok(Route {
                summary: "Main St W".to_string(),
                legs: vec![],
                polyline: None,
            }),
        }
    }
}

fn pos(lat: f64, lng: f64) -> Position {
    Position::new(lat, lng).unwrap()
}

fn bank_catalog() -> StoreCatalog {
    StoreCatalog::from_json(
        r#"{
            "Bank": {
                "icon": "img/bank.png",
                "message": "Open weekdays",
                "website": "https://bank.example",
                "locations": {
                    "Main": { "position": "43.25,-79.88", "address": "1 Main St", "link": "http://x" }
                }
            }
        }"#,
    )
    .unwrap()
}

/// Categories and locations are deliberately out of alphabetical order.
fn two_store_catalog() -> StoreCatalog {
    StoreCatalog::from_json(
        r#"{
            "Pharmacy": {
                "locations": {
                    "Downtown": { "position": "43.27,-79.86", "address": "3 James St" }
                }
            },
            "Bank": {
                "locations": {
                    "Main": { "position": "43.25,-79.88", "address": "1 Main St", "link": "http://x" },
                    "King": { "position": { "lat": 43.26, "lng": -79.87 }, "address": "2 King St" }
                }
            },
            "Empty": {}
        }"#,
    )
    .unwrap()
}

fn state(provider: FakeProvider, catalog: &StoreCatalog) -> AppState<FakeProvider> {
    AppState::with_catalog(provider, catalog).0
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bank_main_filter_scenario() {
    let mut app = state(FakeProvider::default(), &bank_catalog());

    assert_eq!(app.records().len(), 1);
    assert_eq!(app.records()[0].category, "Bank");
    assert_eq!(app.records()[0].label, "Bank - Main");
    assert_eq!(app.visible_count(), 1);

    app.dispatch(Command::Filter("bank".to_string())).await;
    assert_eq!(app.visible_count(), 1);

    app.dispatch(Command::Filter("Pharmacy".to_string())).await;
    assert_eq!(app.visible_count(), 0);

    app.dispatch(Command::Filter("all".to_string())).await;
    assert_eq!(app.visible_count(), 1);
}

#[tokio::test]
async fn filter_button_caption_selects_category() {
    let mut app = state(FakeProvider::default(), &two_store_catalog());

    app.dispatch(Command::FilterButton("Show Pharmacy Stores".to_string()))
        .await;

    let visible: Vec<&str> = app.visible_records().map(|r| r.name.as_str()).collect();
    assert_eq!(visible, vec!["Downtown"]);
    assert_eq!(app.filter().key(), "Pharmacy");
}

#[tokio::test]
async fn stores_without_locations_are_skipped() {
    let (app, report) = AppState::with_catalog(FakeProvider::default(), &two_store_catalog());
    assert_eq!(report.markers, 3);
    assert_eq!(report.skipped_stores, 1);
    assert_eq!(app.listing().groups.len(), 2);
}

#[tokio::test]
async fn markers_follow_catalog_document_order() {
    let app = state(FakeProvider::default(), &two_store_catalog());

    let labels: Vec<&str> = app.records().iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Pharmacy - Downtown", "Bank - Main", "Bank - King"]);

    let headings: Vec<String> = app.listing().groups.iter().map(|g| g.heading()).collect();
    assert_eq!(headings, vec!["Pharmacy (1 Location)", "Bank (2 Locations)"]);
}

// ---------------------------------------------------------------------------
// Listing and popups
// ---------------------------------------------------------------------------

#[tokio::test]
async fn focus_centers_on_entry_at_zoom_14() {
    let mut app = state(FakeProvider::default(), &two_store_catalog());
    assert_eq!(app.view().zoom, 11);

    app.dispatch(Command::Focus(MarkerId(2))).await;

    assert_eq!(app.view().center, pos(43.26, -79.87));
    assert_eq!(app.view().zoom, 14);
}

#[tokio::test]
async fn only_one_popup_is_open_and_map_click_closes_it() {
    let mut app = state(FakeProvider::default(), &two_store_catalog());

    app.dispatch(Command::OpenInfo(MarkerId(2))).await;
    app.dispatch(Command::OpenInfo(MarkerId(0))).await;
    let popup = app.popup().expect("popup should be open");
    assert_eq!(popup.marker, MarkerId(0));
    assert!(matches!(popup.content, PopupContent::Store { ref heading, .. } if heading == "Pharmacy - Downtown"));

    app.dispatch(Command::MapClick).await;
    assert!(app.popup().is_none());
}

#[tokio::test]
async fn hidden_marker_popup_does_not_open() {
    let mut app = state(FakeProvider::default(), &two_store_catalog());
    app.dispatch(Command::Filter("Bank".to_string())).await;

    assert!(!app.is_visible(MarkerId(0)));
    assert!(app.open_info(MarkerId(0)).is_none());
    assert!(app.popup().is_none());

    let popup = app.open_info(MarkerId(1)).expect("visible marker opens");
    assert_eq!(popup.marker, MarkerId(1));

    app.dispatch(Command::OpenInfo(MarkerId(0))).await;
    assert_eq!(app.popup().map(|p| p.marker), Some(MarkerId(1)));
}

// ---------------------------------------------------------------------------
// Geocoding and geolocation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_marker_appends_custom_marker_and_rebuilds_views() {
    let provider = FakeProvider {
        geocode_result: Some(pos(43.3, -79.9)),
        ..FakeProvider::default()
    };
    let mut app = state(provider, &bank_catalog());

    app.dispatch(Command::AddMarker {
        address: "50 Bay St".to_string(),
        title: "Office".to_string(),
        description: Some("Work".to_string()),
    })
    .await;

    assert_eq!(app.records().len(), 2);
    let custom = &app.records()[1];
    assert_eq!(custom.origin, MarkerOrigin::UserAdded);
    assert_eq!(custom.address.as_deref(), Some("50 Bay St"));
    assert_eq!(app.view().center, pos(43.3, -79.9));

    let group = app.listing().group("Custom Markers").expect("custom group");
    assert_eq!(group.heading(), "Custom Markers (1 Location)");
    assert_eq!(app.route().options().origin.len(), 3);
}

#[tokio::test]
async fn geocode_failure_notifies_with_status() {
    let provider = FakeProvider {
        geocode_status: Some("ZERO_RESULTS"),
        ..FakeProvider::default()
    };
    let mut app = state(provider, &bank_catalog());

    app.dispatch(Command::AddMarker {
        address: "nowhere".to_string(),
        title: "x".to_string(),
        description: None,
    })
    .await;

    assert_eq!(app.records().len(), 1);
    assert_eq!(
        app.take_notifications(),
        vec!["Geocode was not successful for the following reason: ZERO_RESULTS"]
    );
    assert!(app.notifications().is_empty());
}

#[tokio::test]
async fn geolocate_twice_adds_one_marker_and_recenters_each_time() {
    let provider = FakeProvider {
        reverse_address: Some("100 King St W"),
        ..FakeProvider::default()
    };
    let mut app = state(provider, &bank_catalog());

    app.dispatch(Command::Geolocate(pos(43.2, -79.8))).await;
    app.dispatch(Command::Geolocate(pos(43.21, -79.81))).await;

    let geolocated: Vec<_> = app
        .records()
        .iter()
        .filter(|r| r.origin == MarkerOrigin::Geolocated)
        .collect();
    assert_eq!(geolocated.len(), 1);
    assert_eq!(geolocated[0].label, GEOLOCATED_TITLE);
    assert_eq!(geolocated[0].address.as_deref(), Some("100 King St W"));
    assert_eq!(app.view().center, pos(43.21, -79.81));
    assert_eq!(FakeProvider::calls(&app.provider().reverse_calls), 2);
}

#[tokio::test]
async fn reverse_geocode_failure_notifies_and_uses_unknown_sentinel() {
    let provider = FakeProvider {
        reverse_status: Some("OVER_QUERY_LIMIT"),
        ..FakeProvider::default()
    };
    let mut app = state(provider, &bank_catalog());

    let id = app.geolocate(pos(43.2, -79.8)).await;

    assert!(id.is_some());
    assert_eq!(
        app.take_notifications(),
        vec!["Geocode was not successful for the following reason: OVER_QUERY_LIMIT"]
    );
    let record = app.registry().geolocated().expect("geolocated marker");
    assert_eq!(record.display_address(), UNKNOWN_ADDRESS);
    assert_eq!(app.view().center, pos(43.2, -79.8));
}

#[tokio::test]
async fn geolocate_without_address_uses_unknown_sentinel() {
    let mut app = state(FakeProvider::default(), &bank_catalog());

    app.dispatch(Command::Geolocate(pos(43.2, -79.8))).await;

    let record = app.registry().geolocated().expect("geolocated marker");
    assert_eq!(record.display_address(), UNKNOWN_ADDRESS);
    assert!(app.notifications().is_empty());
}

// ---------------------------------------------------------------------------
// Route selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn route_with_empty_slot_issues_no_request() {
    let mut app = state(FakeProvider::default(), &two_store_catalog());

    app.dispatch(Command::RequestRoute).await;
    app.dispatch(Command::Select(Slot::Origin, Some("43.25,-79.88".to_string())))
        .await;
    app.dispatch(Command::RequestRoute).await;

    assert_eq!(FakeProvider::calls(&app.provider().directions_calls), 0);
    assert_eq!(
        app.take_notifications(),
        vec![
            "Please select both an origin and a destination.",
            "Please select both an origin and a destination.",
        ]
    );
    assert_eq!(app.route_phase(), RoutePhase::OriginSet);
}

#[tokio::test]
async fn route_with_both_slots_renders() {
    let mut app = state(FakeProvider::default(), &two_store_catalog());

    app.dispatch(Command::Select(Slot::Origin, Some("43.25,-79.88".to_string())))
        .await;
    app.dispatch(Command::Select(Slot::Destination, Some("43.27,-79.86".to_string())))
        .await;
    app.dispatch(Command::RequestRoute).await;

    assert_eq!(FakeProvider::calls(&app.provider().directions_calls), 1);
    assert_eq!(app.route_phase(), RoutePhase::RouteRendered);
    assert_eq!(
        app.route().rendered().map(|r| r.summary.as_str()),
        Some("Main St W")
    );
}

#[tokio::test]
async fn route_failure_surfaces_provider_status() {
    let provider = FakeProvider {
        directions_status: Some("ZERO_RESULTS"),
        ..FakeProvider::default()
    };
    let mut app = state(provider, &two_store_catalog());

    app.dispatch(Command::Select(Slot::Origin, Some("43.25,-79.88".to_string())))
        .await;
    app.dispatch(Command::Select(Slot::Destination, Some("43.27,-79.86".to_string())))
        .await;
    app.dispatch(Command::RequestRoute).await;

    assert_eq!(
        app.take_notifications(),
        vec!["Directions request failed due to ZERO_RESULTS"]
    );
    assert_eq!(app.route_phase(), RoutePhase::BothSet);
}

#[tokio::test]
async fn selecting_same_marker_in_both_slots_is_rejected() {
    let mut app = state(FakeProvider::default(), &two_store_catalog());

    app.dispatch(Command::Select(Slot::Origin, Some("43.25,-79.88".to_string())))
        .await;
    app.dispatch(Command::Select(Slot::Destination, Some("43.25,-79.88".to_string())))
        .await;

    assert_eq!(app.route().destination(), None);
    assert_eq!(app.notifications().len(), 1);
}

#[tokio::test]
async fn selection_survives_registry_rebuild() {
    let provider = FakeProvider {
        geocode_result: Some(pos(43.3, -79.9)),
        ..FakeProvider::default()
    };
    let mut app = state(provider, &two_store_catalog());

    app.dispatch(Command::Select(Slot::Origin, Some("43.25,-79.88".to_string())))
        .await;
    app.dispatch(Command::AddMarker {
        address: "50 Bay St".to_string(),
        title: "Office".to_string(),
        description: None,
    })
    .await;

    assert_eq!(app.route().origin(), Some("43.25,-79.88"));
    let disabled: Vec<&str> = app
        .route()
        .options()
        .destination
        .iter()
        .filter(|o| o.disabled)
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(disabled, vec!["43.25,-79.88"]);
}
