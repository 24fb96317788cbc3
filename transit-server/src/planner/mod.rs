//! Route planning over the transit graph.
//!
//! This module answers "how do I get from this stop to that one?": it runs
//! Dijkstra's algorithm over the graph under each optimization metric,
//! turns the resulting edge paths into timed itineraries with transfer
//! buffers and fares, then ranks them by the rider's preference.

mod config;
mod dijkstra;
mod error;
mod fare;
mod itinerary;
mod rank;
mod search;

pub use config::PlannerConfig;
pub use dijkstra::{Path, shortest_path, shortest_path_with_transfers};
pub use error::PlanError;
pub use fare::{FarePolicy, FlatFare};
pub use itinerary::{Hop, Itinerary, ItineraryBuilder, Leg};
pub use rank::{Preference, dedup_by_route, rank_itineraries};
pub use search::{PlanRequest, PlanResult, RoutePlanner};
