//! Planner configuration.

use std::time::Duration;

use crate::domain::ClockTime;

/// Configuration parameters for route planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Minutes added whenever an itinerary changes line.
    pub transfer_buffer_mins: u32,

    /// Maximum number of itineraries to return.
    pub max_results: usize,

    /// Departure time used when neither the request nor the first line
    /// of the route provides one.
    pub default_departure: ClockTime,

    /// Wall-clock budget for one planning call (milliseconds).
    /// Enforced by the caller, not by the search itself.
    pub time_budget_ms: u64,

    /// Also search with line changes penalized by the transfer buffer,
    /// offering its result as an alternate.
    pub transfer_aware_alternates: bool,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        transfer_buffer_mins: u32,
        max_results: usize,
        default_departure: ClockTime,
        time_budget_ms: u64,
        transfer_aware_alternates: bool,
    ) -> Self {
        Self {
            transfer_buffer_mins,
            max_results,
            default_departure,
            time_budget_ms,
            transfer_aware_alternates,
        }
    }

    /// Returns the time budget as a Duration.
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            transfer_buffer_mins: 15,
            max_results: 3,
            default_departure: ClockTime::from_hm(8, 0).unwrap_or_default(),
            time_budget_ms: 2000,
            transfer_aware_alternates: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.transfer_buffer_mins, 15);
        assert_eq!(config.max_results, 3);
        assert_eq!(config.default_departure.to_string(), "8:00 AM");
        assert_eq!(config.time_budget_ms, 2000);
        assert!(config.transfer_aware_alternates);
    }

    #[test]
    fn time_budget_duration() {
        let config = PlannerConfig::default();
        assert_eq!(config.time_budget(), Duration::from_secs(2));
    }

    #[test]
    fn custom_config() {
        let nine = ClockTime::from_hm(9, 0).unwrap();
        let config = PlannerConfig::new(10, 5, nine, 500, false);

        assert_eq!(config.transfer_buffer_mins, 10);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.default_departure, nine);
        assert_eq!(config.time_budget(), Duration::from_millis(500));
        assert!(!config.transfer_aware_alternates);
    }
}
