//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalog::Line;
use crate::planner::{Hop, Itinerary, Leg};

/// Query for the stop search endpoint.
#[derive(Debug, Deserialize)]
pub struct StopsQuery {
    /// Search text; all stops are listed when absent
    pub q: Option<String>,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<String>,
}

/// A line in the catalog listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResult {
    pub line_id: String,
    pub name: Option<String>,
    pub service_class: &'static str,
    pub stops: Vec<String>,
    /// Departures from the first stop, e.g. "8:00 AM"
    pub timings: Vec<String>,
}

impl LineResult {
    pub fn from_line(line: &Line) -> Self {
        Self {
            line_id: line.id.to_string(),
            name: line.name.clone(),
            service_class: line.service_class.as_str(),
            stops: line.stops.clone(),
            timings: line.timings.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// Query for the plan endpoint.
#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    /// Origin stop name
    pub from: String,

    /// Destination stop name
    pub to: String,

    /// "fastest" (default), "cheapest" or "fewest_transfers"
    pub preference: Option<String>,

    /// Departure time, "8:00 AM" or "08:00"
    pub time: Option<String>,
}

/// One bus ridden: boarding to alighting on a single line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResult {
    pub line_id: String,
    pub service_class: &'static str,
    pub from: String,
    pub to: String,
    pub departure_time: String,
    pub arrival_time: String,
    /// Every stop called at, boarding and alighting included
    pub stops: Vec<String>,
    pub duration_min: u32,
    pub fare: u32,
}

impl SegmentResult {
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            line_id: leg.line.to_string(),
            service_class: leg.service_class.as_str(),
            from: leg.from.clone(),
            to: leg.to.clone(),
            departure_time: leg.departure.to_string(),
            arrival_time: leg.arrival.to_string(),
            stops: leg.stops.clone(),
            duration_min: leg.duration_min,
            fare: leg.fare,
        }
    }
}

/// A single stop-to-stop hop.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HopResult {
    pub line_id: String,
    pub from: String,
    pub to: String,
    pub departure_time: String,
    pub arrival_time: String,
}

impl HopResult {
    pub fn from_hop(hop: &Hop) -> Self {
        Self {
            line_id: hop.line().to_string(),
            from: hop.from.clone(),
            to: hop.to.clone(),
            departure_time: hop.departure.to_string(),
            arrival_time: hop.arrival.to_string(),
        }
    }
}

/// An itinerary in plan results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    pub segments: Vec<SegmentResult>,
    pub hops: Vec<HopResult>,
    pub departure_time: String,
    pub arrival_time: String,
    pub total_duration_min: u32,
    pub total_distance_km: f64,
    pub transfer_count: usize,
    pub estimated_fare: u32,
}

impl ItineraryResult {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            segments: itinerary.legs().iter().map(SegmentResult::from_leg).collect(),
            hops: itinerary.hops().iter().map(HopResult::from_hop).collect(),
            departure_time: itinerary.departure().to_string(),
            arrival_time: itinerary.arrival().to_string(),
            total_duration_min: itinerary.total_duration_min(),
            total_distance_km: itinerary.total_distance_km(),
            transfer_count: itinerary.transfer_count(),
            estimated_fare: itinerary.estimated_fare(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub itineraries: Vec<ItineraryResult>,
}

/// Error body for any failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
