//! Rider-facing itineraries.
//!
//! An [`Itinerary`] turns a raw edge path into something a rider can
//! follow: clock times for every hop, a transfer buffer wherever the line
//! changes, and an approximate fare. Hops on the same line are merged
//! into [`Leg`]s, one per bus boarded.

use crate::catalog::ServiceClass;
use crate::domain::{ClockTime, LineId};
use crate::graph::{Edge, Metric, TransitGraph};

use super::dijkstra::Path;
use super::error::PlanError;
use super::fare::FarePolicy;

/// One traversed edge with its stop names and clock times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub edge: Edge,
    pub from: String,
    pub to: String,
    pub departure: ClockTime,
    pub arrival: ClockTime,
    pub fare: u32,
}

impl Hop {
    pub fn line(&self) -> &LineId {
        &self.edge.line
    }
}

/// A ride on one bus: consecutive hops sharing a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub line: LineId,
    pub service_class: ServiceClass,
    /// Boarding stop
    pub from: String,
    /// Alighting stop
    pub to: String,
    pub departure: ClockTime,
    pub arrival: ClockTime,
    /// Every stop called at, boarding and alighting included.
    pub stops: Vec<String>,
    pub distance_m: u32,
    pub duration_min: u32,
    pub fare: u32,
}

impl Leg {
    fn start(hop: &Hop, service_class: ServiceClass) -> Self {
        Self {
            line: hop.edge.line.clone(),
            service_class,
            from: hop.from.clone(),
            to: hop.to.clone(),
            departure: hop.departure,
            arrival: hop.arrival,
            stops: vec![hop.from.clone(), hop.to.clone()],
            distance_m: hop.edge.distance_m,
            duration_min: hop.edge.duration_min,
            fare: hop.fare,
        }
    }

    fn extend(&mut self, hop: &Hop) {
        self.to = hop.to.clone();
        self.arrival = hop.arrival;
        self.stops.push(hop.to.clone());
        self.distance_m = self.distance_m.saturating_add(hop.edge.distance_m);
        self.duration_min = self.duration_min.saturating_add(hop.edge.duration_min);
        self.fare = self.fare.saturating_add(hop.fare);
    }
}

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - At least one hop
/// - Hops chain: `hops[i].edge.to == hops[i + 1].edge.from`
/// - Adjacent legs are on different lines
/// - `transfer_count() == legs().len() - 1`
#[derive(Debug, Clone)]
pub struct Itinerary {
    hops: Vec<Hop>,
    legs: Vec<Leg>,
    total_distance_m: u32,
    total_duration_min: u32,
    estimated_fare: u32,
    metric: Metric,
}

impl Itinerary {
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn total_distance_m(&self) -> u32 {
        self.total_distance_m
    }

    /// Total distance in kilometres.
    pub fn total_distance_km(&self) -> f64 {
        f64::from(self.total_distance_m) / 1000.0
    }

    /// Riding time plus every transfer buffer.
    pub fn total_duration_min(&self) -> u32 {
        self.total_duration_min
    }

    /// Number of line changes.
    pub fn transfer_count(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }

    /// Sum of per-hop fares.
    pub fn estimated_fare(&self) -> u32 {
        self.estimated_fare
    }

    /// Departure from the origin.
    pub fn departure(&self) -> ClockTime {
        // Non-empty by construction
        self.hops[0].departure
    }

    /// Arrival at the destination.
    pub fn arrival(&self) -> ClockTime {
        self.hops[self.hops.len() - 1].arrival
    }

    /// Metric of the search that produced this itinerary.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn origin(&self) -> &str {
        &self.hops[0].from
    }

    pub fn destination(&self) -> &str {
        &self.hops[self.hops.len() - 1].to
    }

    /// Returns true if both itineraries ride the same edges in order.
    pub fn same_route(&self, other: &Itinerary) -> bool {
        self.hops.len() == other.hops.len()
            && self
                .hops
                .iter()
                .zip(&other.hops)
                .all(|(a, b)| a.edge == b.edge)
    }
}

/// Converts engine paths into itineraries.
pub struct ItineraryBuilder<'a> {
    graph: &'a TransitGraph,
    fares: &'a dyn FarePolicy,
    transfer_buffer_mins: u32,
}

impl<'a> ItineraryBuilder<'a> {
    pub fn new(
        graph: &'a TransitGraph,
        fares: &'a dyn FarePolicy,
        transfer_buffer_mins: u32,
    ) -> Self {
        Self {
            graph,
            fares,
            transfer_buffer_mins,
        }
    }

    /// Build an itinerary leaving the origin at `start`.
    ///
    /// Each hop departs when the previous one arrives, except after a
    /// change of line, where the transfer buffer is waited out first.
    /// Clock times wrap past midnight. Totals saturate at `u32::MAX`, as
    /// path costs do.
    ///
    /// # Errors
    ///
    /// - [`PlanError::EmptyPath`] if the path has no edges
    /// - [`PlanError::UnknownLine`] if an edge names a line the graph
    ///   does not hold
    pub fn build(&self, path: &Path, start: ClockTime) -> Result<Itinerary, PlanError> {
        if path.edges.is_empty() {
            return Err(PlanError::EmptyPath);
        }

        let mut hops: Vec<Hop> = Vec::with_capacity(path.edges.len());
        let mut legs: Vec<Leg> = Vec::new();
        let mut clock = start;
        let mut total_duration_min = 0u32;
        let mut total_distance_m = 0u32;
        let mut estimated_fare = 0u32;

        for edge in &path.edges {
            let line = self
                .graph
                .line(&edge.line)
                .ok_or_else(|| PlanError::UnknownLine(edge.line.to_string()))?;

            let changes_line = hops.last().is_some_and(|prev| prev.edge.line != edge.line);
            if changes_line {
                clock = clock.add_minutes(self.transfer_buffer_mins);
                total_duration_min = total_duration_min.saturating_add(self.transfer_buffer_mins);
            }

            let arrival = clock.add_minutes(edge.duration_min);
            let hop = Hop {
                edge: edge.clone(),
                from: self.graph.stop_name(edge.from).to_string(),
                to: self.graph.stop_name(edge.to).to_string(),
                departure: clock,
                arrival,
                fare: self.fares.hop_fare(line.service_class),
            };

            total_duration_min = total_duration_min.saturating_add(edge.duration_min);
            total_distance_m = total_distance_m.saturating_add(edge.distance_m);
            estimated_fare = estimated_fare.saturating_add(hop.fare);

            match legs.last_mut() {
                Some(leg) if !changes_line => leg.extend(&hop),
                _ => legs.push(Leg::start(&hop, line.service_class)),
            }

            clock = arrival;
            hops.push(hop);
        }

        Ok(Itinerary {
            hops,
            legs,
            total_distance_m,
            total_duration_min,
            estimated_fare,
            metric: path.metric,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Line;
    use crate::planner::dijkstra::shortest_path;
    use crate::planner::fare::FlatFare;

    fn t(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    fn line(id: &str, stops: &[&str]) -> Line {
        Line::new(id, stops.iter().copied(), vec![t("8:00 AM")])
    }

    fn path_between(graph: &TransitGraph, from: &str, to: &str) -> Path {
        let from = graph.lookup(from).unwrap();
        let to = graph.lookup(to).unwrap();
        shortest_path(graph, from, to, Metric::Duration).unwrap().unwrap()
    }

    fn transfer_graph() -> TransitGraph {
        TransitGraph::from_lines(vec![line("A", &["X", "Y", "Z"]), line("B", &["Z", "W"])]).unwrap()
    }

    #[test]
    fn same_line_has_no_buffer() {
        let graph = TransitGraph::from_lines(vec![line("A", &["X", "Y", "Z"])]).unwrap();
        let fares = FlatFare::default();
        let builder = ItineraryBuilder::new(&graph, &fares, 15);

        let itinerary = builder.build(&path_between(&graph, "X", "Z"), t("8:00 AM")).unwrap();
        let hops = itinerary.hops();

        assert_eq!(hops.len(), 2);
        assert_eq!(hops[0].arrival, hops[1].departure);
        assert_eq!(itinerary.transfer_count(), 0);
        assert_eq!(itinerary.legs().len(), 1);
        assert_eq!(itinerary.total_duration_min(), 20);
        assert_eq!(itinerary.arrival(), t("8:20 AM"));
    }

    #[test]
    fn line_change_inserts_buffer() {
        let graph = transfer_graph();
        let fares = FlatFare::default();
        let builder = ItineraryBuilder::new(&graph, &fares, 15);

        let itinerary = builder.build(&path_between(&graph, "X", "W"), t("8:00 AM")).unwrap();
        let legs = itinerary.legs();

        assert_eq!(legs.len(), 2);
        assert_eq!(itinerary.transfer_count(), 1);
        assert_eq!(legs[0].line.as_str(), "A");
        assert_eq!(legs[0].stops, vec!["X", "Y", "Z"]);
        assert_eq!(legs[0].departure, t("8:00 AM"));
        assert_eq!(legs[0].arrival, t("8:20 AM"));
        assert_eq!(legs[1].line.as_str(), "B");
        assert_eq!(legs[0].arrival.minutes_until(legs[1].departure), 15);
        assert_eq!(legs[1].departure, t("8:35 AM"));
        assert_eq!(legs[1].arrival, t("8:45 AM"));
        assert_eq!(itinerary.total_duration_min(), 45);
        assert_eq!(itinerary.total_distance_m(), 4500);
        assert!((itinerary.total_distance_km() - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_buffer_is_honored() {
        let graph = transfer_graph();
        let fares = FlatFare::default();
        let builder = ItineraryBuilder::new(&graph, &fares, 0);

        let itinerary = builder.build(&path_between(&graph, "X", "W"), t("8:00 AM")).unwrap();
        assert_eq!(itinerary.legs()[0].arrival, itinerary.legs()[1].departure);
        assert_eq!(itinerary.total_duration_min(), 30);
        assert_eq!(itinerary.transfer_count(), 1);
    }

    #[test]
    fn clock_rolls_over() {
        let graph = transfer_graph();
        let fares = FlatFare::default();
        let builder = ItineraryBuilder::new(&graph, &fares, 15);

        let morning = builder.build(&path_between(&graph, "X", "W"), t("11:30 AM")).unwrap();
        assert_eq!(morning.arrival().to_string(), "12:15 PM");

        let night = builder.build(&path_between(&graph, "X", "W"), t("11:30 PM")).unwrap();
        assert_eq!(night.legs()[1].departure.to_string(), "12:05 AM");
        assert_eq!(night.arrival().to_string(), "12:15 AM");
    }

    #[test]
    fn fare_sums_hops_by_service_class() {
        let graph = TransitGraph::from_lines(vec![
            line("AC-9", &["X", "Y", "Z"]).with_service_class(ServiceClass::AirConditioned),
            line("B", &["Z", "W"]),
        ])
        .unwrap();
        let fares = FlatFare::default();
        let builder = ItineraryBuilder::new(&graph, &fares, 15);

        let itinerary = builder.build(&path_between(&graph, "X", "W"), t("8:00 AM")).unwrap();
        assert_eq!(itinerary.estimated_fare(), 45 + 45 + 16);
        assert_eq!(itinerary.legs()[0].fare, 90);
        assert_eq!(itinerary.legs()[0].service_class, ServiceClass::AirConditioned);
        assert_eq!(itinerary.legs()[1].fare, 16);
    }

    #[test]
    fn hops_chain_and_names_resolve() {
        let graph = transfer_graph();
        let fares = FlatFare::default();
        let builder = ItineraryBuilder::new(&graph, &fares, 15);

        let itinerary = builder.build(&path_between(&graph, "x", "w"), t("8:00 AM")).unwrap();
        assert_eq!(itinerary.origin(), "X");
        assert_eq!(itinerary.destination(), "W");
        for pair in itinerary.hops().windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
            assert_eq!(pair[0].edge.to, pair[1].edge.from);
        }
        assert_eq!(itinerary.metric(), Metric::Duration);
    }

    #[test]
    fn empty_path_is_rejected() {
        let graph = transfer_graph();
        let fares = FlatFare::default();
        let builder = ItineraryBuilder::new(&graph, &fares, 15);
        let empty = Path {
            edges: vec![],
            cost: 0,
            metric: Metric::Duration,
        };

        assert_eq!(builder.build(&empty, t("8:00 AM")).unwrap_err(), PlanError::EmptyPath);
    }

    #[test]
    fn unknown_line_is_rejected() {
        let graph = transfer_graph();
        let fares = FlatFare::default();
        let builder = ItineraryBuilder::new(&graph, &fares, 15);

        let mut path = path_between(&graph, "X", "Y");
        path.edges[0].line = LineId::from("ghost");

        assert_eq!(
            builder.build(&path, t("8:00 AM")).unwrap_err(),
            PlanError::UnknownLine("ghost".into())
        );
    }

    #[test]
    fn same_route_compares_edges() {
        let graph = transfer_graph();
        let fares = FlatFare::default();
        let builder = ItineraryBuilder::new(&graph, &fares, 15);
        let path = path_between(&graph, "X", "W");

        let a = builder.build(&path, t("8:00 AM")).unwrap();
        let b = builder.build(&path, t("5:00 PM")).unwrap();
        let short = builder.build(&path_between(&graph, "X", "Z"), t("8:00 AM")).unwrap();

        assert!(a.same_route(&b));
        assert!(!a.same_route(&short));
    }
}
