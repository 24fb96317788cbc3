//! Stop registry.

use std::collections::HashMap;
use std::fmt;

use super::DomainError;

/// Normalize a stop name into its lookup key.
///
/// Leading and trailing whitespace is removed, internal runs of whitespace
/// collapse to a single space, and the result is lowercased.
///
/// # Examples
///
/// ```
/// use transit_server::domain::normalize_stop_name;
///
/// assert_eq!(normalize_stop_name("  Howrah   Station "), "howrah station");
/// assert_eq!(normalize_stop_name("PARK street"), "park street");
/// ```
pub fn normalize_stop_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Handle to a stop registered in a [`StopIndex`].
///
/// Only meaningful for the index that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(u32);

impl StopId {
    /// Position of the stop in registration order.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

#[derive(Debug, Clone)]
struct Stop {
    /// Normalized key, the stop's identity
    key: String,
    /// Display name, the smallest spelling registered
    name: String,
}

/// Case-insensitive registry of every stop in the network.
///
/// Stops are identified by their normalized name, so `"Park Street"` and
/// `"park  street"` are the same stop. The display name is the
/// lexicographically smallest spelling registered, so it does not depend
/// on registration order.
#[derive(Debug, Clone, Default)]
pub struct StopIndex {
    stops: Vec<Stop>,
    by_key: HashMap<String, StopId>,
}

impl StopIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop, returning its id.
    ///
    /// Registering a name that is already present (in any casing) returns
    /// the existing id. The display name becomes the new spelling if it
    /// sorts before the current one.
    pub fn register(&mut self, name: &str) -> Result<StopId, DomainError> {
        let key = normalize_stop_name(name);
        if key.is_empty() {
            return Err(DomainError::EmptyStopName);
        }
        let spelling = name.split_whitespace().collect::<Vec<_>>().join(" ");

        if let Some(&id) = self.by_key.get(&key) {
            let stop = &mut self.stops[id.index()];
            if spelling < stop.name {
                stop.name = spelling;
            }
            return Ok(id);
        }

        let id = StopId(self.stops.len() as u32);
        self.stops.push(Stop {
            key: key.clone(),
            name: spelling,
        });
        self.by_key.insert(key, id);
        Ok(id)
    }

    /// Look up a stop by name.
    ///
    /// Matching is exact after normalization; there is no partial matching.
    pub fn lookup(&self, name: &str) -> Result<StopId, DomainError> {
        self.by_key
            .get(&normalize_stop_name(name))
            .copied()
            .ok_or_else(|| DomainError::UnknownStop(name.trim().to_string()))
    }

    /// Returns true if `id` was issued by this index.
    pub fn contains(&self, id: StopId) -> bool {
        id.index() < self.stops.len()
    }

    /// Display name of a stop.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this index.
    pub fn name(&self, id: StopId) -> &str {
        &self.stops[id.index()].name
    }

    /// Normalized key of a stop.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this index.
    pub fn key(&self, id: StopId) -> &str {
        &self.stops[id.index()].key
    }

    /// All display names, sorted case-insensitively.
    pub fn all(&self) -> Vec<&str> {
        let mut stops: Vec<&Stop> = self.stops.iter().collect();
        stops.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.name.cmp(&b.name)));
        stops.into_iter().map(|s| s.name.as_str()).collect()
    }

    /// Search stops whose name contains `query`.
    ///
    /// Stops whose name starts with the query come first, then the rest;
    /// each group is alphabetical. An empty query matches every stop.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = normalize_stop_name(query);

        let mut matches: Vec<(bool, &Stop)> = self
            .stops
            .iter()
            .filter(|s| s.key.contains(&needle))
            .map(|s| (!s.key.starts_with(&needle), s))
            .collect();

        matches.sort_by(|(a_rest, a), (b_rest, b)| {
            a_rest.cmp(b_rest).then_with(|| a.key.cmp(&b.key))
        });

        matches
            .into_iter()
            .take(limit)
            .map(|(_, s)| s.name.as_str())
            .collect()
    }

    /// Number of registered stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if no stops are registered.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any re-casing or re-spacing of a registered name finds the same stop
        #[test]
        fn lookup_ignores_case_and_spacing(
            words in proptest::collection::vec("[a-zA-Z]{1,8}", 1..4),
            upper in any::<bool>(),
        ) {
            let name = words.join(" ");
            let mut index = StopIndex::new();
            let id = index.register(&name).unwrap();

            let variant = if upper {
                format!("  {}  ", words.join("   ").to_uppercase())
            } else {
                words.join("\t").to_lowercase()
            };
            prop_assert_eq!(index.lookup(&variant).unwrap(), id);
        }

        /// Registering the same names in any order yields the same listing,
        /// display spellings included
        #[test]
        fn all_is_order_independent(
            mut names in proptest::collection::vec("[a-cA-C]{1,4}( [a-cA-C]{1,3})?", 1..12),
        ) {
            let forward = {
                let mut index = StopIndex::new();
                for n in &names { index.register(n).unwrap(); }
                index.all().into_iter().map(str::to_string).collect::<Vec<_>>()
            };
            names.reverse();
            let backward = {
                let mut index = StopIndex::new();
                for n in &names { index.register(n).unwrap(); }
                index.all().into_iter().map(str::to_string).collect::<Vec<_>>()
            };
            prop_assert_eq!(forward, backward);
        }
    }
}
