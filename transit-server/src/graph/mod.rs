//! Transit network graph.
//!
//! Stops are nodes; every pair of consecutive stops on a line becomes an
//! edge tagged with that line. Edges are keyed by `(from, to, line)`, so
//! two lines serving the same pair of stops stay distinguishable to the
//! path search.

mod edge;
mod error;
mod transit_graph;
mod weights;

pub use edge::{Edge, Metric};
pub use error::GraphError;
pub use transit_graph::{Directionality, GraphOptions, TransitGraph};
pub use weights::{ConstantHopWeights, HopWeight, HopWeights, TableHopWeights};
