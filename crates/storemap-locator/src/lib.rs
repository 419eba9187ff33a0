pub mod app;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod listing;
pub mod provider;
pub mod registry;
pub mod route;

pub use app::{AppState, Command, MapView, OpenPopup, PopupContent};
pub use catalog::{load_catalog, try_load_catalog, CatalogFetchOptions, CatalogSource};
pub use error::{LocatorError, ProviderError};
pub use filter::{filter_key_from_button_label, FilterState, Visibility, ALL_CATEGORIES};
pub use listing::{present, CategoryGroup, Listing, ListingEntry, ViewChange, FOCUS_ZOOM};
pub use provider::{
    ConfiguredProvider, GoogleMapsClient, MapProvider, Route, RouteLeg, TravelMode,
    UnconfiguredProvider,
};
pub use registry::{BuildReport, MarkerRegistry, GEOLOCATED_TITLE};
pub use route::{
    populate_options, RouteError, RouteOption, RouteOptions, RoutePhase, RouteSelection, Slot,
};
