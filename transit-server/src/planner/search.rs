//! Route planning.
//!
//! [`RoutePlanner`] is the entry point the web layer talks to. It resolves
//! stop names, runs the shortest-path engine under each metric, turns the
//! paths into itineraries, and returns them ranked.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Line;
use crate::domain::{ClockTime, StopId};
use crate::graph::{Metric, TransitGraph};

use super::config::PlannerConfig;
use super::dijkstra::{Path, shortest_path, shortest_path_with_transfers};
use super::error::PlanError;
use super::fare::{FarePolicy, FlatFare};
use super::itinerary::{Itinerary, ItineraryBuilder};
use super::rank::{Preference, dedup_by_route, rank_itineraries};

/// Request for a route plan.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Origin stop name, matched case-insensitively.
    pub origin: String,

    /// Destination stop name, matched case-insensitively.
    pub destination: String,

    pub preference: Preference,

    /// Departure time from the origin. When absent, the first departure
    /// of the first line ridden is used.
    pub depart_at: Option<ClockTime>,
}

impl PlanRequest {
    /// Create a new plan request.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        preference: Preference,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            preference,
            depart_at: None,
        }
    }

    /// Set the departure time.
    pub fn with_departure(mut self, depart_at: ClockTime) -> Self {
        self.depart_at = Some(depart_at);
        self
    }
}

/// Result of route planning.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// Itineraries, ranked best-first. Empty when no route exists.
    pub itineraries: Vec<Itinerary>,

    /// Number of shortest-path searches run.
    pub searches_run: usize,
}

impl PlanResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self {
            itineraries: Vec::new(),
            searches_run: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.itineraries.is_empty()
    }

    /// The top-ranked itinerary.
    pub fn best(&self) -> Option<&Itinerary> {
        self.itineraries.first()
    }
}

/// Plans routes over a shared, immutable transit graph.
///
/// Cheap to clone; all state is behind `Arc`s, so one planner can serve
/// any number of concurrent requests.
#[derive(Clone)]
pub struct RoutePlanner {
    graph: Arc<TransitGraph>,
    fares: Arc<dyn FarePolicy>,
    config: PlannerConfig,
}

impl RoutePlanner {
    pub fn new(
        graph: Arc<TransitGraph>,
        fares: Arc<dyn FarePolicy>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            graph,
            fares,
            config,
        }
    }

    /// A planner with flat fares and default configuration.
    pub fn with_defaults(graph: TransitGraph) -> Self {
        Self::new(
            Arc::new(graph),
            Arc::new(FlatFare::default()),
            PlannerConfig::default(),
        )
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan routes from origin to destination.
    ///
    /// Searches once per metric, plus a transfer-penalized search when
    /// enabled. Every candidate starts from the same clock time, so
    /// their durations and arrivals are directly comparable. Candidates
    /// riding identical edges are merged before ranking.
    ///
    /// # Errors
    ///
    /// - [`PlanError::UnknownStop`] if either name is not a known stop
    /// - [`PlanError::SameOriginDestination`] if both names resolve to
    ///   the same stop
    ///
    /// No route between two known stops is an empty result, not an error.
    pub fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        let origin = self.resolve(&request.origin)?;
        let destination = self.resolve(&request.destination)?;
        if origin == destination {
            return Err(PlanError::SameOriginDestination(
                self.graph.stop_name(origin).to_string(),
            ));
        }

        let mut paths: Vec<Path> = Vec::new();
        let mut searches_run = 0;

        for metric in request.preference.search_metrics() {
            searches_run += 1;
            if let Some(path) = shortest_path(&self.graph, origin, destination, metric)? {
                paths.push(path);
            }
        }

        if self.config.transfer_aware_alternates {
            searches_run += 1;
            if let Some(path) = shortest_path_with_transfers(
                &self.graph,
                origin,
                destination,
                Metric::Duration,
                self.config.transfer_buffer_mins,
            )? {
                paths.push(path);
            }
        }

        let Some(primary) = paths.first() else {
            debug!(
                origin = %request.origin,
                destination = %request.destination,
                "no route found"
            );
            return Ok(PlanResult {
                itineraries: Vec::new(),
                searches_run,
            });
        };

        let start = request
            .depart_at
            .or_else(|| self.first_departure(primary))
            .unwrap_or(self.config.default_departure);

        let builder = ItineraryBuilder::new(
            &self.graph,
            self.fares.as_ref(),
            self.config.transfer_buffer_mins,
        );
        let candidates = paths
            .iter()
            .map(|path| builder.build(path, start))
            .collect::<Result<Vec<_>, _>>()?;
        let candidate_count = candidates.len();

        let mut itineraries = rank_itineraries(dedup_by_route(candidates), request.preference);
        itineraries.truncate(self.config.max_results);

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            preference = %request.preference,
            start = %start,
            candidates = candidate_count,
            returned = itineraries.len(),
            "planned route"
        );

        Ok(PlanResult {
            itineraries,
            searches_run,
        })
    }

    /// Every stop name, alphabetically.
    pub fn list_all_stops(&self) -> Vec<&str> {
        self.graph.stops().all()
    }

    /// Stop names matching `query`, prefix matches first.
    pub fn search_stops(&self, query: &str, limit: usize) -> Vec<&str> {
        self.graph.stops().search(query, limit)
    }

    /// Every line, ordered by id.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.graph.lines()
    }

    fn resolve(&self, name: &str) -> Result<StopId, PlanError> {
        self.graph
            .lookup(name)
            .map_err(|_| PlanError::UnknownStop(name.trim().to_string()))
    }

    /// First published departure of the line the path boards first.
    fn first_departure(&self, path: &Path) -> Option<ClockTime> {
        let edge = path.edges.first()?;
        self.graph.line(&edge.line)?.first_departure()
    }
}
