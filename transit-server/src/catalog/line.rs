//! Bus line types.

use serde::{Deserialize, Serialize};

use crate::domain::{ClockTime, LineId};

/// Class of service a line runs, which decides its fare band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceClass {
    /// Ordinary bus
    #[default]
    Standard,
    /// Air-conditioned bus, charged at a higher flat rate
    AirConditioned,
}

impl ServiceClass {
    /// Short label used in API output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceClass::Standard => "standard",
            ServiceClass::AirConditioned => "air_conditioned",
        }
    }
}

/// A bus line: a route code, its call pattern, and its departures.
///
/// Every trip on a line leaves the first stop at one of `timings`; times
/// at later stops are derived from hop durations, not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id: LineId,
    /// Human-readable route description, e.g. "Kudghat to Nabanna".
    pub name: Option<String>,
    /// Stop names in calling order.
    pub stops: Vec<String>,
    /// Departure times from the first stop.
    pub timings: Vec<ClockTime>,
    pub service_class: ServiceClass,
}

impl Line {
    /// Create a standard-class line with no published name.
    pub fn new<S: Into<String>>(
        id: impl Into<LineId>,
        stops: impl IntoIterator<Item = S>,
        timings: Vec<ClockTime>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            stops: stops.into_iter().map(Into::into).collect(),
            timings,
            service_class: ServiceClass::Standard,
        }
    }

    /// Set the service class.
    pub fn with_service_class(mut self, service_class: ServiceClass) -> Self {
        self.service_class = service_class;
        self
    }

    /// Set the route description.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// First published departure, if any.
    ///
    /// Timings are taken in catalog order; they are not checked for being
    /// sorted.
    pub fn first_departure(&self) -> Option<ClockTime> {
        self.timings.first().copied()
    }
}
