//! Graph construction and queries.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::edge::Edge;
use super::error::GraphError;
use super::weights::{ConstantHopWeights, HopWeights};
use crate::catalog::{CatalogError, Line};
use crate::domain::{DomainError, LineId, StopId, StopIndex};

/// Which way a line's call pattern may be travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directionality {
    /// Every hop can be ridden both ways.
    ///
    /// This treats one-way loop routes as if they also ran in reverse.
    #[default]
    Bidirectional,
    /// Hops only run in calling order; a return trip needs its own line.
    Directed,
}

/// Options controlling graph construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphOptions {
    pub directionality: Directionality,
}

/// The bus network as a weighted multigraph of stops.
///
/// Built once from the catalog and read-only afterwards, so it can be
/// shared freely between threads behind an `Arc`.
///
/// # Invariants
///
/// - Every edge endpoint is registered in the stop index
/// - At most one edge per `(from, to, line)`
/// - Each adjacency list is sorted by (neighbor name, line id)
#[derive(Debug, Clone)]
pub struct TransitGraph {
    stops: StopIndex,
    /// Outgoing edges, indexed by stop position.
    adjacency: Vec<Vec<Edge>>,
    edge_keys: HashSet<(StopId, StopId, LineId)>,
    lines: BTreeMap<LineId, Line>,
    directionality: Directionality,
}

impl TransitGraph {
    /// Build a graph with the default 1.5 km / 10 minute hop estimate.
    pub fn from_lines(lines: Vec<Line>) -> Result<Self, CatalogError> {
        Self::build(lines, &ConstantHopWeights::default(), GraphOptions::default())
    }

    /// Build a graph from catalog lines.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] if a line has fewer than two
    /// stops, a blank stop name, the same stop twice in a row, or an id
    /// already used by another line.
    pub fn build<W: HopWeights + ?Sized>(
        lines: Vec<Line>,
        weights: &W,
        options: GraphOptions,
    ) -> Result<Self, CatalogError> {
        let mut graph = Self {
            stops: StopIndex::new(),
            adjacency: Vec::new(),
            edge_keys: HashSet::new(),
            lines: BTreeMap::new(),
            directionality: options.directionality,
        };

        for line in lines {
            graph.add_line(line, weights)?;
        }
        graph.sort_adjacency();

        debug!(
            stops = graph.stop_count(),
            edges = graph.edge_count(),
            lines = graph.lines.len(),
            directionality = ?graph.directionality,
            "built transit graph"
        );

        Ok(graph)
    }

    fn add_line<W: HopWeights + ?Sized>(
        &mut self,
        line: Line,
        weights: &W,
    ) -> Result<(), CatalogError> {
        if self.lines.contains_key(&line.id) {
            return Err(CatalogError::malformed(line.id.as_str(), "duplicate line id"));
        }
        if line.stops.len() < 2 {
            return Err(CatalogError::malformed(
                line.id.as_str(),
                "needs at least two stops",
            ));
        }

        let ids = line
            .stops
            .iter()
            .map(|name| self.register(name))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::malformed(line.id.as_str(), e.to_string()))?;

        for (i, pair) in ids.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            if from == to {
                return Err(CatalogError::malformed(
                    line.id.as_str(),
                    format!("stop {:?} appears twice in a row", line.stops[i + 1]),
                ));
            }

            let weight = weights.hop_weight(&line, &line.stops[i], &line.stops[i + 1]);
            let edge = Edge {
                from,
                to,
                line: line.id.clone(),
                distance_m: weight.distance_m,
                duration_min: weight.duration_min,
            };

            if self.directionality == Directionality::Bidirectional {
                self.upsert(edge.reversed());
            }
            self.upsert(edge);
        }

        self.lines.insert(line.id.clone(), line);
        Ok(())
    }

    fn register(&mut self, name: &str) -> Result<StopId, DomainError> {
        let id = self.stops.register(name)?;
        if self.adjacency.len() < self.stops.len() {
            self.adjacency.resize_with(self.stops.len(), Vec::new);
        }
        Ok(id)
    }

    /// Insert an edge unless one already exists for its `(from, to, line)`.
    fn upsert(&mut self, edge: Edge) {
        let key = (edge.from, edge.to, edge.line.clone());
        if self.edge_keys.insert(key) {
            self.adjacency[edge.from.index()].push(edge);
        }
    }

    fn sort_adjacency(&mut self) {
        let stops = &self.stops;
        for edges in &mut self.adjacency {
            edges.sort_by(|a, b| {
                stops
                    .key(a.to)
                    .cmp(stops.key(b.to))
                    .then_with(|| a.line.cmp(&b.line))
            });
        }
    }

    /// Outgoing edges of a stop.
    pub fn neighbors(&self, stop: StopId) -> Result<&[Edge], GraphError> {
        self.adjacency
            .get(stop.index())
            .map(Vec::as_slice)
            .ok_or_else(|| GraphError::UnknownStop(format!("{stop:?}")))
    }

    /// Outgoing edges of a stop given by name.
    pub fn neighbors_of(&self, name: &str) -> Result<&[Edge], GraphError> {
        let id = self
            .stops
            .lookup(name)
            .map_err(|_| GraphError::UnknownStop(name.trim().to_string()))?;
        self.neighbors(id)
    }

    /// The edge from `from` to `to` on `line`, if the line serves that hop.
    pub fn edge(&self, from: StopId, to: StopId, line: &LineId) -> Option<&Edge> {
        self.adjacency
            .get(from.index())?
            .iter()
            .find(|e| e.to == to && &e.line == line)
    }

    /// Iterate over every directed edge.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.adjacency.iter().flatten()
    }

    /// The stop index.
    pub fn stops(&self) -> &StopIndex {
        &self.stops
    }

    /// Resolve a stop name.
    pub fn lookup(&self, name: &str) -> Result<StopId, DomainError> {
        self.stops.lookup(name)
    }

    /// Display name of a stop.
    pub fn stop_name(&self, id: StopId) -> &str {
        self.stops.name(id)
    }

    /// A line by id.
    pub fn line(&self, id: &LineId) -> Option<&Line> {
        self.lines.get(id)
    }

    /// All lines, ordered by id.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// Number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of directed edges; a bidirectional hop counts twice.
    pub fn edge_count(&self) -> usize {
        self.edge_keys.len()
    }

    pub fn directionality(&self) -> Directionality {
        self.directionality
    }
}
