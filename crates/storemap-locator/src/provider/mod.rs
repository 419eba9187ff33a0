//! The mapping provider boundary.
//!
//! Everything the locator needs from an external map service: forward and
//! reverse geocoding plus driving directions. Any service that can answer
//! these three requests can stand in for [`GoogleMapsClient`].

mod google;
mod retry;
mod types;

use std::future::Future;

use serde::Serialize;
use storemap_core::Position;

use crate::error::ProviderError;

pub use google::GoogleMapsClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
}

impl TravelMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
        }
    }
}

/// One leg of a computed route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub start_address: String,
    pub end_address: String,
    pub distance_text: String,
    pub distance_meters: u64,
    pub duration_text: String,
    pub duration_secs: u64,
}

/// A rendered route returned by the directions service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub summary: String,
    pub legs: Vec<RouteLeg>,
    /// Encoded overview polyline, if the provider returned one.
    pub polyline: Option<String>,
}

impl Route {
    #[must_use]
    pub fn total_distance_meters(&self) -> u64 {
        self.legs.iter().map(|l| l.distance_meters).sum()
    }

    #[must_use]
    pub fn total_duration_secs(&self) -> u64 {
        self.legs.iter().map(|l| l.duration_secs).sum()
    }
}

/// Request/response contract for the external map service.
pub trait MapProvider {
    /// Resolve a free-text address to a position.
    fn geocode(&self, address: &str) -> impl Future<Output = Result<Position, ProviderError>>;

    /// Find the formatted address nearest to `position`. `Ok(None)` when the
    /// service has no result for the point.
    fn reverse_geocode(
        &self,
        position: Position,
    ) -> impl Future<Output = Result<Option<String>, ProviderError>>;

    /// Compute a route between two positions.
    fn directions(
        &self,
        origin: Position,
        destination: Position,
        mode: TravelMode,
    ) -> impl Future<Output = Result<Route, ProviderError>>;
}

/// Provider used when no API key is configured: every request fails with
/// [`ProviderError::NotConfigured`], so the rest of the page keeps working.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredProvider;

const UNCONFIGURED_REASON: &str = "set GOOGLE_MAPS_API_KEY to enable geocoding and directions";

impl MapProvider for UnconfiguredProvider {
    async fn geocode(&self, _address: &str) -> Result<Position, ProviderError> {
        Err(ProviderError::NotConfigured(UNCONFIGURED_REASON.to_string()))
    }

    async fn reverse_geocode(&self, _position: Position) -> Result<Option<String>, ProviderError> {
        Err(ProviderError::NotConfigured(UNCONFIGURED_REASON.to_string()))
    }

    async fn directions(
        &self,
        _origin: Position,
        _destination: Position,
        _mode: TravelMode,
    ) -> Result<Route, ProviderError> {
        Err(ProviderError::NotConfigured(UNCONFIGURED_REASON.to_string()))
    }
}

/// Either the Google client or the unconfigured fallback, chosen from config.
#[derive(Debug)]
pub enum ConfiguredProvider {
    Google(GoogleMapsClient),
    Unconfigured(UnconfiguredProvider),
}

impl ConfiguredProvider {
    /// Build the provider described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built, or
    /// [`ProviderError::NotConfigured`] if the base URL is invalid.
    pub fn from_config(config: &storemap_core::AppConfig) -> Result<Self, ProviderError> {
        match config.maps_api_key.as_deref() {
            Some(key) => Ok(ConfiguredProvider::Google(GoogleMapsClient::from_config(
                key, config,
            )?)),
            None => {
                tracing::warn!("GOOGLE_MAPS_API_KEY not set; geocoding and directions disabled");
                Ok(ConfiguredProvider::Unconfigured(UnconfiguredProvider))
            }
        }
    }
}

impl MapProvider for ConfiguredProvider {
    async fn geocode(&self, address: &str) -> Result<Position, ProviderError> {
        match self {
            ConfiguredProvider::Google(client) => client.geocode(address).await,
            ConfiguredProvider::Unconfigured(p) => p.geocode(address).await,
        }
    }

    async fn reverse_geocode(&self, position: Position) -> Result<Option<String>, ProviderError> {
        match self {
            ConfiguredProvider::Google(client) => client.reverse_geocode(position).await,
            ConfiguredProvider::Unconfigured(p) => p.reverse_geocode(position).await,
        }
    }

    async fn directions(
        &self,
        origin: Position,
        destination: Position,
        mode: TravelMode,
    ) -> Result<Route, ProviderError> {
        match self {
            ConfiguredProvider::Google(client) => {
                client.directions(origin, destination, mode).await
            }
            ConfiguredProvider::Unconfigured(p) => p.directions(origin, destination, mode).await,
        }
    }
}
