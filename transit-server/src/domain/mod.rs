//! Domain types for the transit route planner.
//!
//! This module contains the small value types the rest of the planner is
//! built on: canonical stops, times of day, and line identifiers. All types
//! enforce their invariants at construction time, so code that receives
//! them can trust their validity.

mod clock;
mod error;
mod line_id;
mod stop;

pub use clock::{ClockTime, TimeError};
pub use error::DomainError;
pub use line_id::LineId;
pub use stop::{StopId, StopIndex, normalize_stop_name};
