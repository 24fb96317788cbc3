//! Web layer for the bus route planner.
//!
//! Provides JSON endpoints for browsing stops and lines and for planning
//! routes.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
