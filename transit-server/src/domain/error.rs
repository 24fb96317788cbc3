//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from catalog IO errors and from planning outcomes.

/// Domain-level errors for validation and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A stop name was empty after trimming
    #[error("stop name must not be empty")]
    EmptyStopName,

    /// A stop name did not match any registered stop
    #[error("stop not recognized: {0}")]
    UnknownStop(String),
}
