//! Route selection: origin/destination selectors and the directions request
//! lifecycle.
//!
//! Option values are `"lat,lng"` keys. An option is disabled in one list
//! exactly when its value is selected in the other, so both slots can never
//! hold the same marker.

use serde::Serialize;
use storemap_core::{MarkerRecord, Position};
use thiserror::Error;

use crate::provider::Route;

pub const ORIGIN_PLACEHOLDER: &str = "Select Origin";
pub const DESTINATION_PLACEHOLDER: &str = "Select Destination";
pub const SELECT_BOTH_MESSAGE: &str = "Please select both an origin and a destination.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("{SELECT_BOTH_MESSAGE}")]
    MissingEndpoint,

    #[error("no route option with value '{0}'")]
    UnknownOption(String),

    #[error("'{0}' is already selected in the other list")]
    OptionDisabled(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Origin,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

/// The two selector lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteOptions {
    pub origin: Vec<RouteOption>,
    pub destination: Vec<RouteOption>,
}

impl RouteOptions {
    fn list(&self, slot: Slot) -> &[RouteOption] {
        match slot {
            Slot::Origin => &self.origin,
            Slot::Destination => &self.destination,
        }
    }
}

impl RouteOption {
    fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
            disabled: false,
        }
    }

    /// The empty leading entry of each list.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// A placeholder followed by one option per marker, in registry order.
#[must_use]
pub fn populate_options(records: &[MarkerRecord]) -> RouteOptions {
    let markers = records.iter().map(|record| RouteOption {
        value: record.key(),
        label: record.label.clone(),
        disabled: false,
    });

    let mut origin = vec![RouteOption::placeholder(ORIGIN_PLACEHOLDER)];
    let mut destination = vec![RouteOption::placeholder(DESTINATION_PLACEHOLDER)];
    for option in markers {
        origin.push(option.clone());
        destination.push(option);
    }

    RouteOptions {
        origin,
        destination,
    }
}

/// Disable, in each list, the options matching the other list's selection
/// and enable everything else.
pub fn disable_matching_options(
    options: &mut RouteOptions,
    origin: Option<&str>,
    destination: Option<&str>,
) {
    for option in &mut options.destination {
        option.disabled = !option.is_placeholder() && origin.is_some_and(|o| o == option.value);
    }
    for option in &mut options.origin {
        option.disabled =
            !option.is_placeholder() && destination.is_some_and(|d| d == option.value);
    }
}

/// Where the selection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePhase {
    Idle,
    OriginSet,
    DestinationSet,
    BothSet,
    RequestInFlight,
    RouteRendered,
}

/// Endpoints handed to the directions service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub origin: Position,
    pub destination: Position,
}

#[derive(Debug, Clone, Default)]
pub struct RouteSelection {
    origin: Option<String>,
    destination: Option<String>,
    options: RouteOptions,
    in_flight: bool,
    rendered: Option<Route>,
}

impl RouteSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Regenerate both lists from the registry. Selections whose marker is
    /// gone are cleared, then disabled flags are recomputed.
    pub fn rebuild(&mut self, records: &[MarkerRecord]) {
        self.options = populate_options(records);
        let known = |key: &Option<String>| {
            key.as_deref().is_some_and(|k| {
                self.options
                    .origin
                    .iter()
                    .any(|o| !o.is_placeholder() && o.value == k)
            })
        };
        let origin_known = known(&self.origin);
        let destination_known = known(&self.destination);
        if !origin_known {
            self.origin = None;
        }
        if !destination_known {
            self.destination = None;
        }
        if !(origin_known && destination_known) {
            self.rendered = None;
        }
        self.on_selection_change();
    }

    /// Select one slot. `None` or the placeholder's empty value clears it.
    /// Changing an endpoint discards the rendered route.
    ///
    /// # Errors
    ///
    /// - [`RouteError::UnknownOption`] if no option has that value.
    /// - [`RouteError::OptionDisabled`] if the value is selected in the other slot.
    pub fn select(&mut self, slot: Slot, key: Option<&str>) -> Result<(), RouteError> {
        let key = key.filter(|k| !k.is_empty());
        if let Some(key) = key {
            let option = self
                .options
                .list(slot)
                .iter()
                .find(|o| o.value == key)
                .ok_or_else(|| RouteError::UnknownOption(key.to_string()))?;
            if option.disabled {
                return Err(RouteError::OptionDisabled(key.to_string()));
            }
        }

        let current = match slot {
            Slot::Origin => &mut self.origin,
            Slot::Destination => &mut self.destination,
        };
        if current.as_deref() != key {
            *current = key.map(str::to_string);
            self.rendered = None;
        }
        self.on_selection_change();
        Ok(())
    }

    /// Recompute disabled flags from the current selections.
    pub fn on_selection_change(&mut self) {
        disable_matching_options(
            &mut self.options,
            self.origin.as_deref(),
            self.destination.as_deref(),
        );
    }

    /// Validate both slots and mark a request as in flight. Any previously
    /// rendered route is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingEndpoint`] when either slot is empty; no
    /// request should be issued in that case.
    pub fn begin_request(&mut self) -> Result<RouteRequest, RouteError> {
        let (Some(origin), Some(destination)) =
            (self.origin.as_deref(), self.destination.as_deref())
        else {
            return Err(RouteError::MissingEndpoint);
        };

        let origin: Position = origin
            .parse()
            .map_err(|_| RouteError::UnknownOption(origin.to_string()))?;
        let destination: Position = destination
            .parse()
            .map_err(|_| RouteError::UnknownOption(destination.to_string()))?;

        self.in_flight = true;
        self.rendered = None;
        Ok(RouteRequest {
            origin,
            destination,
        })
    }

    /// Record a successful response. The latest response always wins.
    pub fn complete(&mut self, route: Route) {
        self.in_flight = false;
        self.rendered = Some(route);
    }

    /// Record a failed response; the selection stays route-eligible.
    pub fn fail(&mut self) {
        self.in_flight = false;
    }

    #[must_use]
    pub fn phase(&self) -> RoutePhase {
        if self.in_flight {
            return RoutePhase::RequestInFlight;
        }
        match (&self.origin, &self.destination) {
            (Some(_), Some(_)) if self.rendered.is_some() => RoutePhase::RouteRendered,
            (Some(_), Some(_)) => RoutePhase::BothSet,
            (Some(_), None) => RoutePhase::OriginSet,
            (None, Some(_)) => RoutePhase::DestinationSet,
            (None, None) => RoutePhase::Idle,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    #[must_use]
    pub fn rendered(&self) -> Option<&Route> {
        self.rendered.as_ref()
    }
}
