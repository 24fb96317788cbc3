//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::planner::RoutePlanner;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Route planner over the loaded catalog
    pub planner: Arc<RoutePlanner>,

    /// Deadline for one plan request
    pub plan_timeout: Duration,
}

impl AppState {
    /// Create a new app state, taking the plan deadline from the
    /// planner's configuration.
    pub fn new(planner: RoutePlanner) -> Self {
        let plan_timeout = planner.config().time_budget();
        Self {
            planner: Arc::new(planner),
            plan_timeout,
        }
    }

    /// Override the plan deadline.
    pub fn with_plan_timeout(mut self, plan_timeout: Duration) -> Self {
        self.plan_timeout = plan_timeout;
        self
    }
}
