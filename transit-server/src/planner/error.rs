//! Planning error types.

use crate::graph::GraphError;

/// Errors from planning a route.
///
/// "No route between two known stops" is not an error; it is an empty
/// [`PlanResult`](super::PlanResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Origin or destination is not a known stop
    #[error("stop not recognized: {0}")]
    UnknownStop(String),

    /// Origin and destination resolve to the same stop
    #[error("origin and destination are the same stop: {0}")]
    SameOriginDestination(String),

    /// An itinerary needs at least one hop
    #[error("cannot build an itinerary from an empty path")]
    EmptyPath,

    /// A path edge refers to a line the graph does not know
    #[error("path uses unknown line {0}")]
    UnknownLine(String),

    /// Planning did not finish within the caller's time budget
    #[error("route planning timed out")]
    Timeout,
}

impl From<GraphError> for PlanError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::UnknownStop(name) => PlanError::UnknownStop(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlanError::UnknownStop("Nowhere".into());
        assert_eq!(err.to_string(), "stop not recognized: Nowhere");

        let err = PlanError::SameOriginDestination("Maidan".into());
        assert_eq!(
            err.to_string(),
            "origin and destination are the same stop: Maidan"
        );

        let err = PlanError::Timeout;
        assert_eq!(err.to_string(), "route planning timed out");
    }

    #[test]
    fn graph_error_converts() {
        let err: PlanError = GraphError::UnknownStop("X".into()).into();
        assert_eq!(err, PlanError::UnknownStop("X".into()));
    }
}
