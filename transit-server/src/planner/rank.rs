//! Itinerary ranking for plan results.
//!
//! Candidates come from several searches and can overlap, so they are
//! deduplicated by route before being ordered by the rider's preference.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::Metric;

use super::itinerary::Itinerary;

/// What the rider wants optimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    /// Shortest total duration
    #[default]
    Fastest,
    /// Lowest estimated fare
    Cheapest,
    /// Fewest line changes
    FewestTransfers,
}

impl Preference {
    /// Metrics to search under, primary first.
    ///
    /// Fare and transfers are not edge weights, so every preference
    /// searches by duration and takes distance as the alternate; the
    /// preference only decides the final ordering.
    pub fn search_metrics(&self) -> [Metric; 2] {
        [Metric::Duration, Metric::Distance]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Fastest => "fastest",
            Preference::Cheapest => "cheapest",
            Preference::FewestTransfers => "fewest_transfers",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastest" => Ok(Preference::Fastest),
            "cheapest" => Ok(Preference::Cheapest),
            "fewest_transfers" | "fewest-transfers" => Ok(Preference::FewestTransfers),
            other => Err(format!("unknown preference: {other}")),
        }
    }
}

fn compare(a: &Itinerary, b: &Itinerary, preference: Preference) -> Ordering {
    match preference {
        Preference::Fastest => a
            .total_duration_min()
            .cmp(&b.total_duration_min())
            .then_with(|| a.transfer_count().cmp(&b.transfer_count()))
            .then_with(|| a.estimated_fare().cmp(&b.estimated_fare())),
        Preference::Cheapest => a
            .estimated_fare()
            .cmp(&b.estimated_fare())
            .then_with(|| a.total_duration_min().cmp(&b.total_duration_min())),
        Preference::FewestTransfers => a
            .transfer_count()
            .cmp(&b.transfer_count())
            .then_with(|| a.total_duration_min().cmp(&b.total_duration_min())),
    }
}

/// Rank itineraries by preference, best first.
///
/// - Fastest: total duration, then transfers, then fare
/// - Cheapest: fare, then duration
/// - Fewest transfers: transfer count, then duration
///
/// The sort is stable, so full ties keep their search order.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>, preference: Preference) -> Vec<Itinerary> {
    itineraries.sort_by(|a, b| compare(a, b, preference));
    itineraries
}

/// Drop itineraries that ride the same edges as an earlier one.
///
/// Identity is by route, not cost: two different routes with equal
/// duration are both kept.
pub fn dedup_by_route(itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    let mut result: Vec<Itinerary> = Vec::with_capacity(itineraries.len());
    for itinerary in itineraries {
        if !result.iter().any(|kept| kept.same_route(&itinerary)) {
            result.push(itinerary);
        }
    }
    result
}
