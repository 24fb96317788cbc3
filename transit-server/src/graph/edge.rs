//! Graph edges and the metrics used to weigh them.

use std::fmt;
use std::str::FromStr;

use crate::domain::{LineId, StopId};

/// Optimization criterion for path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Minimize in-vehicle minutes
    Duration,
    /// Minimize metres travelled
    Distance,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Duration => f.write_str("duration"),
            Metric::Distance => f.write_str("distance"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duration" | "time" => Ok(Metric::Duration),
            "distance" => Ok(Metric::Distance),
            other => Err(format!("unknown metric: {other}")),
        }
    }
}

/// A direct hop between two consecutive stops on one line.
///
/// Distances are whole metres so that path costs are totally ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: StopId,
    pub to: StopId,
    pub line: LineId,
    pub distance_m: u32,
    pub duration_min: u32,
}

impl Edge {
    /// Cost of traversing this edge under `metric`.
    pub fn cost(&self, metric: Metric) -> u32 {
        match metric {
            Metric::Duration => self.duration_min,
            Metric::Distance => self.distance_m,
        }
    }

    /// Distance in kilometres.
    pub fn distance_km(&self) -> f64 {
        f64::from(self.distance_m) / 1000.0
    }

    /// The same hop travelled the other way.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            line: self.line.clone(),
            distance_m: self.distance_m,
            duration_min: self.duration_min,
        }
    }
}
