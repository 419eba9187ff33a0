//! Google Maps web-service response types.
//!
//! Both the Geocoding and Directions APIs wrap results in a
//! `{"status": "OK", ...}` envelope; non-`OK` statuses may carry an
//! `error_message`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsRoute {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
    #[serde(default)]
    pub overview_polyline: Option<Polyline>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsLeg {
    #[serde(default)]
    pub start_address: String,
    #[serde(default)]
    pub end_address: String,
    pub distance: TextValue,
    pub duration: TextValue,
}

/// `{"text": "5.2 km", "value": 5200}`.
#[derive(Debug, Deserialize)]
pub(crate) struct TextValue {
    pub text: String,
    pub value: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Polyline {
    pub points: String,
}
