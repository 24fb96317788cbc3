//! Graph query errors.

/// Errors from querying a built graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The stop was never registered while building the graph
    #[error("stop not recognized: {0}")]
    UnknownStop(String),
}
