//! HTTP client for the Google Maps Geocoding and Directions web services.
//!
//! Every response carries a `"status"` field; anything other than `"OK"` is
//! surfaced verbatim as [`ProviderError::Status`] so the caller can show the
//! provider's own reason.

use std::time::Duration;

use reqwest::{Client, Url};
use storemap_core::{AppConfig, Position};

use super::retry::retry_with_backoff;
use super::types::{DirectionsResponse, GeocodeResponse};
use super::{MapProvider, Route, RouteLeg, TravelMode};
use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Client for the Google Maps web services.
///
/// Use [`GoogleMapsClient::new`] for production or
/// [`GoogleMapsClient::with_base_url`] to point at a mock server in tests.
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for GoogleMapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish_non_exhaustive()
    }
}

impl GoogleMapsClient {
    /// Creates a client pointed at the production Google Maps API with
    /// retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("storemap/0.1 (store-locator)")
            .build()?;
        Self::from_parts(client, api_key, base_url)
    }

    /// Build a client from application config: timeout, user agent, base URL
    /// and retry policy all come from `config`.
    ///
    /// # Errors
    ///
    /// Same as [`GoogleMapsClient::with_base_url`].
    pub fn from_config(api_key: &str, config: &AppConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self::from_parts(client, api_key, &config.maps_base_url)?
            .with_retries(config.max_retries, config.retry_backoff_base_ms))
    }

    /// Enable retries for transient failures.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    fn from_parts(client: Client, api_key: &str, base_url: &str) -> Result<Self, ProviderError> {
        // Ensure exactly one trailing slash so `Url::join` appends to the
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ProviderError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds the endpoint URL with percent-encoded query parameters and the
    /// API key appended last.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, ProviderError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ProviderError::InvalidUrl(format!("'{endpoint}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Single GET of `url`, parsing the body as `T`.
    async fn fetch_once<T>(&self, url: &Url, context: &str) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| ProviderError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// GET `url` with retries on transport failures and transient statuses.
    ///
    /// Permanent statuses are returned inside `T` for the caller to judge.
    async fn request<T>(
        &self,
        url: &Url,
        context: &str,
        status_of: fn(&T) -> &str,
    ) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
    {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, move || async move {
            let body: T = self.fetch_once(url, context).await?;
            check_transient_status(status_of(&body))?;
            Ok(body)
        })
        .await
    }

    async fn geocode_request(
        &self,
        params: &[(&str, &str)],
        context: &str,
    ) -> Result<GeocodeResponse, ProviderError> {
        let url = self.build_url("geocode/json", params)?;
        self.request(&url, context, geocode_status).await
    }
}

fn geocode_status(body: &GeocodeResponse) -> &str {
    &body.status
}

fn directions_status(body: &DirectionsResponse) -> &str {
    &body.status
}

/// Surface transient statuses as errors so the retry loop sees them; other
/// statuses are handled by the caller.
fn check_transient_status(status: &str) -> Result<(), ProviderError> {
    if super::retry::is_retriable(&ProviderError::Status(status.to_owned())) {
        return Err(ProviderError::Status(status.to_owned()));
    }
    Ok(())
}

fn check_status(status: &str) -> Result<(), ProviderError> {
    if status == STATUS_OK {
        Ok(())
    } else {
        Err(ProviderError::Status(status.to_owned()))
    }
}

impl MapProvider for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<Position, ProviderError> {
        let body = self
            .geocode_request(&[("address", address)], &format!("geocode(address={address})"))
            .await?;
        check_status(&body.status)?;

        let first = body
            .results
            .first()
            .ok_or_else(|| ProviderError::Status(STATUS_ZERO_RESULTS.to_owned()))?;
        let location = first.geometry.location;
        tracing::debug!(address, lat = location.lat, lng = location.lng, "geocoded address");
        Ok(Position::new(location.lat, location.lng)?)
    }

    async fn reverse_geocode(&self, position: Position) -> Result<Option<String>, ProviderError> {
        let latlng = position.key();
        let body = self
            .geocode_request(
                &[("latlng", latlng.as_str())],
                &format!("reverse_geocode(latlng={latlng})"),
            )
            .await?;

        if body.status == STATUS_ZERO_RESULTS {
            tracing::debug!(latlng = %latlng, "reverse geocode found no results");
            return Ok(None);
        }
        check_status(&body.status)?;

        Ok(body
            .results
            .into_iter()
            .find_map(|result| result.formatted_address))
    }

    async fn directions(
        &self,
        origin: Position,
        destination: Position,
        mode: TravelMode,
    ) -> Result<Route, ProviderError> {
        let origin_key = origin.key();
        let destination_key = destination.key();
        let url = self.build_url(
            "directions/json",
            &[
                ("origin", origin_key.as_str()),
                ("destination", destination_key.as_str()),
                ("mode", mode.as_str()),
            ],
        )?;
        let context = format!("directions(origin={origin_key}, destination={destination_key})");

        let body = self.request(&url, &context, directions_status).await?;
        check_status(&body.status)?;

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Status(STATUS_ZERO_RESULTS.to_owned()))?;

        Ok(Route {
            summary: route.summary,
            legs: route
                .legs
                .into_iter()
                .map(|leg| RouteLeg {
                    start_address: leg.start_address,
                    end_address: leg.end_address,
                    distance_text: leg.distance.text,
                    distance_meters: leg.distance.value,
                    duration_text: leg.duration.text,
                    duration_secs: leg.duration.value,
                })
                .collect(),
            polyline: route.overview_polyline.map(|p| p.points),
        })
    }
}
