//! Hop weight providers.
//!
//! The catalog carries no geodata or per-stop schedule, so hop distances
//! and durations come from a provider. The default gives every hop the
//! same estimate; a table provider lets measured values replace it pair by
//! pair without touching the graph or search code.

use std::collections::HashMap;

use crate::catalog::Line;
use crate::domain::normalize_stop_name;

/// Distance and duration of a single hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopWeight {
    pub distance_m: u32,
    pub duration_min: u32,
}

impl HopWeight {
    pub fn new(distance_m: u32, duration_min: u32) -> Self {
        Self {
            distance_m,
            duration_min,
        }
    }
}

/// Source of hop weights used while building a graph.
pub trait HopWeights {
    /// Weight of the hop from `from` to `to` on `line`.
    ///
    /// Stop names are passed as they appear in the catalog.
    fn hop_weight(&self, line: &Line, from: &str, to: &str) -> HopWeight;
}

/// Every hop gets the same weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantHopWeights(pub HopWeight);

impl Default for ConstantHopWeights {
    /// 1.5 km and 10 minutes per hop.
    fn default() -> Self {
        Self(HopWeight::new(1500, 10))
    }
}

impl HopWeights for ConstantHopWeights {
    fn hop_weight(&self, _line: &Line, _from: &str, _to: &str) -> HopWeight {
        self.0
    }
}

/// Per stop-pair weights with a fallback for pairs not in the table.
///
/// Pairs are symmetric and matched on normalized stop names.
#[derive(Debug, Clone)]
pub struct TableHopWeights {
    table: HashMap<(String, String), HopWeight>,
    fallback: HopWeight,
}

impl TableHopWeights {
    /// Create an empty table.
    pub fn new(fallback: HopWeight) -> Self {
        Self {
            table: HashMap::new(),
            fallback,
        }
    }

    /// Set the weight between two stops, in both directions.
    pub fn insert(&mut self, a: &str, b: &str, weight: HopWeight) {
        let a = normalize_stop_name(a);
        let b = normalize_stop_name(b);
        self.table.insert((a.clone(), b.clone()), weight);
        self.table.insert((b, a), weight);
    }

    /// Builder form of [`TableHopWeights::insert`].
    pub fn with(mut self, a: &str, b: &str, distance_m: u32, duration_min: u32) -> Self {
        self.insert(a, b, HopWeight::new(distance_m, duration_min));
        self
    }

    /// Number of stop pairs in the table.
    pub fn len(&self) -> usize {
        self.table.len() / 2
    }

    /// Returns true if no pairs have been set.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl HopWeights for TableHopWeights {
    fn hop_weight(&self, _line: &Line, from: &str, to: &str) -> HopWeight {
        self.table
            .get(&(normalize_stop_name(from), normalize_stop_name(to)))
            .copied()
            .unwrap_or(self.fallback)
    }
}
