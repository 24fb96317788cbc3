//! Fare estimation.

use crate::catalog::ServiceClass;

/// Prices a single hop by the class of service it rides.
///
/// Implementations must be cheap and thread-safe: the planner calls them
/// once per hop while building every candidate itinerary.
pub trait FarePolicy: Send + Sync {
    /// Fare in whole rupees for one hop on a line of `class`.
    fn hop_fare(&self, class: ServiceClass) -> u32;
}

/// A flat per-hop fare for each service class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatFare {
    pub standard: u32,
    pub air_conditioned: u32,
}

impl Default for FlatFare {
    /// Rs 16 per hop on ordinary buses, Rs 45 on air-conditioned ones.
    fn default() -> Self {
        Self {
            standard: 16,
            air_conditioned: 45,
        }
    }
}

impl FarePolicy for FlatFare {
    fn hop_fare(&self, class: ServiceClass) -> u32 {
        match class {
            ServiceClass::Standard => self.standard,
            ServiceClass::AirConditioned => self.air_conditioned,
        }
    }
}
