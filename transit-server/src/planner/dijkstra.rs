//! Shortest-path search over the transit graph.
//!
//! Both searches are Dijkstra with a binary-heap frontier, so they run in
//! O((V + E) log V). Costs are non-negative integers under either metric.
//!
//! Ties are resolved deterministically but arbitrarily: the heap pops
//! equal-cost entries in stop-id order, neighbors are relaxed in
//! (neighbor name, line id) order, and an equal-cost relaxation never
//! replaces an existing predecessor. Callers should rely on the returned
//! path being *a* cheapest path, not a particular one.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use tracing::trace;

use crate::domain::{LineId, StopId};
use crate::graph::{Edge, GraphError, Metric, TransitGraph};

/// A path through the graph and its total cost under one metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Edges in travel order; `edges[i].to == edges[i + 1].from`.
    pub edges: Vec<Edge>,
    /// Accumulated cost under `metric`.
    pub cost: u32,
    pub metric: Metric,
}

impl Path {
    /// Returns true if the path has no edges (origin is destination).
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if both paths traverse the same edges in the same order.
    pub fn same_route(&self, other: &Path) -> bool {
        self.edges == other.edges
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: u32,
    node: StopId,
}

// Min-heap by cost, then by stop id
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a cheapest path from `start` to `end` under `metric`.
///
/// Returns `Ok(None)` when `end` is unreachable, and an empty path when
/// `start == end`.
///
/// # Errors
///
/// Returns [`GraphError::UnknownStop`] if either stop is not in `graph`.
pub fn shortest_path(
    graph: &TransitGraph,
    start: StopId,
    end: StopId,
    metric: Metric,
) -> Result<Option<Path>, GraphError> {
    graph.neighbors(start)?;
    graph.neighbors(end)?;

    let mut best: HashMap<StopId, u32> = HashMap::new();
    let mut predecessors: HashMap<StopId, &Edge> = HashMap::new();
    let mut heap = BinaryHeap::new();

    best.insert(start, 0);
    heap.push(State {
        cost: 0,
        node: start,
    });

    let mut settled = 0usize;
    while let Some(State { cost, node }) = heap.pop() {
        if node == end {
            break;
        }

        // Skip stale entries
        if best.get(&node).is_some_and(|&b| cost > b) {
            continue;
        }
        settled += 1;

        for edge in graph.neighbors(node)? {
            let next_cost = cost.saturating_add(edge.cost(metric));

            match best.entry(edge.to) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(edge.to, edge);
                    heap.push(State {
                        cost: next_cost,
                        node: edge.to,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(edge.to, edge);
                        heap.push(State {
                            cost: next_cost,
                            node: edge.to,
                        });
                    }
                }
            }
        }
    }

    trace!(%metric, settled, reached = best.contains_key(&end), "dijkstra finished");

    let Some(&cost) = best.get(&end) else {
        return Ok(None);
    };

    // Follow predecessors backward from end to start
    let mut edges = Vec::new();
    let mut current = end;
    while current != start {
        let Some(&edge) = predecessors.get(&current) else {
            break;
        };
        edges.push(edge.clone());
        current = edge.from;
    }
    edges.reverse();

    Ok(Some(Path {
        edges,
        cost,
        metric,
    }))
}

/// Search state for the transfer-aware search: a stop and the line the
/// rider arrived on (`None` at the origin).
type LineState = (StopId, Option<LineId>);

#[derive(Clone, Eq, PartialEq)]
struct LineHeapEntry {
    cost: u32,
    state: LineState,
}

impl Ord for LineHeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for LineHeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a cheapest path where each change of line costs `transfer_penalty`.
///
/// The search runs over (stop, arriving line) states, so it can prefer
/// staying on one bus over a marginally shorter route with a change. The
/// returned cost includes the penalties paid.
///
/// # Errors
///
/// Returns [`GraphError::UnknownStop`] if either stop is not in `graph`.
pub fn shortest_path_with_transfers(
    graph: &TransitGraph,
    start: StopId,
    end: StopId,
    metric: Metric,
    transfer_penalty: u32,
) -> Result<Option<Path>, GraphError> {
    graph.neighbors(start)?;
    graph.neighbors(end)?;

    let origin: LineState = (start, None);
    let mut best: HashMap<LineState, u32> = HashMap::new();
    let mut predecessors: HashMap<LineState, (LineState, &Edge)> = HashMap::new();
    let mut heap = BinaryHeap::new();

    best.insert(origin.clone(), 0);
    heap.push(LineHeapEntry {
        cost: 0,
        state: origin.clone(),
    });

    let mut reached: Option<(LineState, u32)> = None;
    while let Some(LineHeapEntry { cost, state }) = heap.pop() {
        if state.0 == end {
            reached = Some((state, cost));
            break;
        }

        if best.get(&state).is_some_and(|&b| cost > b) {
            continue;
        }

        for edge in graph.neighbors(state.0)? {
            let penalty = match &state.1 {
                Some(line) if line != &edge.line => transfer_penalty,
                _ => 0,
            };
            let next_cost = cost
                .saturating_add(edge.cost(metric))
                .saturating_add(penalty);
            let next: LineState = (edge.to, Some(edge.line.clone()));

            let improved = best.get(&next).is_none_or(|&b| next_cost < b);
            if improved {
                best.insert(next.clone(), next_cost);
                predecessors.insert(next.clone(), (state.clone(), edge));
                heap.push(LineHeapEntry {
                    cost: next_cost,
                    state: next,
                });
            }
        }
    }

    let Some((mut current, cost)) = reached else {
        return Ok(None);
    };

    let mut edges = Vec::new();
    while current != origin {
        let Some((prev, edge)) = predecessors.get(&current) else {
            break;
        };
        edges.push((*edge).clone());
        current = prev.clone();
    }
    edges.reverse();

    Ok(Some(Path {
        edges,
        cost,
        metric,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Line;
    use crate::graph::{ConstantHopWeights, GraphOptions, HopWeight, TableHopWeights};

    fn line(id: &str, stops: &[&str]) -> Line {
        Line::new(id, stops.iter().copied(), vec![])
    }

    fn graph_with(lines: Vec<Line>, weights: &TableHopWeights) -> TransitGraph {
        TransitGraph::build(lines, weights, GraphOptions::default()).unwrap()
    }

    fn stop(graph: &TransitGraph, name: &str) -> StopId {
        graph.lookup(name).unwrap()
    }

    fn names(graph: &TransitGraph, path: &Path) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(first) = path.edges.first() {
            out.push(graph.stop_name(first.from).to_string());
        }
        out.extend(path.edges.iter().map(|e| graph.stop_name(e.to).to_string()));
        out
    }

    fn assert_chains(path: &Path, start: StopId, end: StopId) {
        assert_eq!(path.edges.first().map(|e| e.from), Some(start));
        assert_eq!(path.edges.last().map(|e| e.to), Some(end));
        for pair in path.edges.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    /// Six stops, two lines; the long way round is shorter in time but
    /// longer in distance.
    ///
    /// ```text
    /// Line F (fast):  A - B - C - D           A-B 5m/3000, B-C 5m/3000, C-D 5m/3000
    /// Line S (short): A - E - F - D           A-E 9m/500,  E-F 9m/500,  F-D 9m/500
    /// ```
    fn two_route_graph() -> TransitGraph {
        let weights = TableHopWeights::new(HopWeight::new(1500, 10))
            .with("A", "B", 3000, 5)
            .with("B", "C", 3000, 5)
            .with("C", "D", 3000, 5)
            .with("A", "E", 500, 9)
            .with("E", "F", 500, 9)
            .with("F", "D", 500, 9);
        graph_with(
            vec![line("F", &["A", "B", "C", "D"]), line("S", &["A", "E", "F", "D"])],
            &weights,
        )
    }

    #[test]
    fn direct_line_path() {
        let graph = TransitGraph::from_lines(vec![line("A", &["X", "Y", "Z"])]).unwrap();
        let (x, z) = (stop(&graph, "X"), stop(&graph, "Z"));

        let path = shortest_path(&graph, x, z, Metric::Duration).unwrap().unwrap();
        assert_eq!(names(&graph, &path), vec!["X", "Y", "Z"]);
        assert_eq!(path.cost, 20);
        assert_eq!(path.metric, Metric::Duration);
        assert_chains(&path, x, z);
    }

    #[test]
    fn backward_travel_on_bidirectional_graph() {
        let graph = TransitGraph::from_lines(vec![line("A", &["X", "Y", "Z"])]).unwrap();
        let path = shortest_path(&graph, stop(&graph, "Z"), stop(&graph, "X"), Metric::Distance)
            .unwrap()
            .unwrap();
        assert_eq!(names(&graph, &path), vec!["Z", "Y", "X"]);
        assert_eq!(path.cost, 3000);
    }

    #[test]
    fn directed_graph_has_no_return_path() {
        let graph = TransitGraph::build(
            vec![line("A", &["X", "Y", "Z"])],
            &ConstantHopWeights::default(),
            GraphOptions {
                directionality: crate::graph::Directionality::Directed,
            },
        )
        .unwrap();
        let (x, z) = (stop(&graph, "X"), stop(&graph, "Z"));

        assert!(shortest_path(&graph, x, z, Metric::Duration).unwrap().is_some());
        assert!(shortest_path(&graph, z, x, Metric::Duration).unwrap().is_none());
    }

    #[test]
    fn metric_changes_the_route() {
        let graph = two_route_graph();
        let (a, d) = (stop(&graph, "A"), stop(&graph, "D"));

        let fastest = shortest_path(&graph, a, d, Metric::Duration).unwrap().unwrap();
        assert_eq!(names(&graph, &fastest), vec!["A", "B", "C", "D"]);
        assert_eq!(fastest.cost, 15);

        let shortest = shortest_path(&graph, a, d, Metric::Distance).unwrap().unwrap();
        assert_eq!(names(&graph, &shortest), vec!["A", "E", "F", "D"]);
        assert_eq!(shortest.cost, 1500);

        assert!(!fastest.same_route(&shortest));
    }

    #[test]
    fn disconnected_graph_has_no_path() {
        let graph = TransitGraph::from_lines(vec![
            line("A", &["X", "Y"]),
            line("B", &["P", "Q"]),
        ])
        .unwrap();

        let result = shortest_path(&graph, stop(&graph, "X"), stop(&graph, "Q"), Metric::Duration);
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn start_equals_end_is_empty_path() {
        let graph = TransitGraph::from_lines(vec![line("A", &["X", "Y"])]).unwrap();
        let x = stop(&graph, "X");

        let path = shortest_path(&graph, x, x, Metric::Duration).unwrap().unwrap();
        assert!(path.is_empty());
        assert_eq!(path.cost, 0);
    }

    #[test]
    fn unknown_stop_id_is_an_error() {
        let small = TransitGraph::from_lines(vec![line("A", &["X", "Y"])]).unwrap();
        let big = TransitGraph::from_lines(vec![line("B", &["P", "Q", "R", "S"])]).unwrap();
        let foreign = stop(&big, "S");
        let x = stop(&small, "X");

        assert!(matches!(
            shortest_path(&small, x, foreign, Metric::Duration),
            Err(GraphError::UnknownStop(_))
        ));
    }

    #[test]
    fn equal_cost_parallel_lines_give_a_legal_path() {
        let graph = TransitGraph::from_lines(vec![
            line("S-2", &["Kalighat", "Hazra More", "Bhowanipore"]),
            line("E-1", &["Kalighat", "Hazra More", "Bhowanipore"]),
        ])
        .unwrap();
        let (k, b) = (stop(&graph, "Kalighat"), stop(&graph, "Bhowanipore"));

        let path = shortest_path(&graph, k, b, Metric::Duration).unwrap().unwrap();
        assert_eq!(path.cost, 20);
        assert_chains(&path, k, b);
        for edge in &path.edges {
            assert!(["S-2", "E-1"].contains(&edge.line.as_str()));
        }
    }

    #[test]
    fn transfer_penalty_prefers_staying_on_board() {
        // Line L runs the long way X-M-N-Z (3 hops); lines P and Q cut
        // through Y with one change (2 hops). With a 15 minute change
        // penalty the single-line route wins.
        let graph = TransitGraph::from_lines(vec![
            line("L", &["X", "M", "N", "Z"]),
            line("P", &["X", "Y"]),
            line("Q", &["Y", "Z"]),
        ])
        .unwrap();
        let (x, z) = (stop(&graph, "X"), stop(&graph, "Z"));

        let plain = shortest_path(&graph, x, z, Metric::Duration).unwrap().unwrap();
        assert_eq!(plain.cost, 20);
        assert_eq!(names(&graph, &plain), vec!["X", "Y", "Z"]);

        let aware = shortest_path_with_transfers(&graph, x, z, Metric::Duration, 15)
            .unwrap()
            .unwrap();
        assert_eq!(aware.cost, 30);
        assert_eq!(names(&graph, &aware), vec!["X", "M", "N", "Z"]);
        assert!(aware.edges.iter().all(|e| e.line.as_str() == "L"));
        assert_chains(&aware, x, z);
    }

    #[test]
    fn transfer_aware_search_counts_penalty_in_cost() {
        let graph = TransitGraph::from_lines(vec![line("A", &["X", "Y"]), line("B", &["Y", "W"])])
            .unwrap();
        let (x, w) = (stop(&graph, "X"), stop(&graph, "W"));

        let path = shortest_path_with_transfers(&graph, x, w, Metric::Duration, 15)
            .unwrap()
            .unwrap();
        assert_eq!(path.cost, 35);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn transfer_aware_search_handles_unreachable() {
        let graph = TransitGraph::from_lines(vec![line("A", &["X", "Y"]), line("B", &["P", "Q"])])
            .unwrap();
        let result = shortest_path_with_transfers(
            &graph,
            stop(&graph, "X"),
            stop(&graph, "P"),
            Metric::Duration,
            15,
        );
        assert_eq!(result, Ok(None));
    }
}
