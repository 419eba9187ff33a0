//! Latitude/longitude pair used by every marker and provider call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A normalized map position. Both coordinates are finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    /// Build a position, rejecting non-finite or out-of-range coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPosition`] when either coordinate is NaN,
    /// infinite, or outside the WGS84 bounds.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidPosition {
            raw: format!("{lat},{lng}"),
            reason: reason.to_string(),
        };

        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self { lat, lng })
    }

    /// The `"lat,lng"` key identifying this position in route selectors.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Position {
    type Err = CoreError;

    /// Parse a `"lat,lng"` string. Whitespace around either half is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| CoreError::InvalidPosition {
            raw: s.to_string(),
            reason,
        };

        let (lat_raw, lng_raw) = s
            .split_once(',')
            .ok_or_else(|| invalid("expected \"lat,lng\"".to_string()))?;

        let lat = lat_raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(format!("latitude: {e}")))?;
        let lng = lng_raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(format!("longitude: {e}")))?;

        Position::new(lat, lng).map_err(|_| invalid("coordinates out of range".to_string()))
    }
}
