//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::graph::{Directionality, GraphOptions};
use crate::planner::PlannerConfig;

/// Errors from reading server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path of the catalog JSON file (`TRANSIT_CATALOG`).
    pub catalog_path: PathBuf,

    /// Listen address (`TRANSIT_BIND`).
    pub bind: SocketAddr,

    /// Graph construction options (`TRANSIT_DIRECTED`).
    pub graph: GraphOptions,

    /// Planner settings (`TRANSIT_TIME_BUDGET_MS`,
    /// `TRANSIT_TRANSFER_BUFFER_MINS`, `TRANSIT_MAX_RESULTS`).
    pub planner: PlannerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/catalog.json"),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            graph: GraphOptions::default(),
            planner: PlannerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("TRANSIT_CATALOG") {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(bind) = lookup("TRANSIT_BIND") {
            config.bind = parse_var("TRANSIT_BIND", &bind)?;
        }
        if let Some(directed) = lookup("TRANSIT_DIRECTED") {
            config.graph.directionality = if parse_var::<bool>("TRANSIT_DIRECTED", &directed)? {
                Directionality::Directed
            } else {
                Directionality::Bidirectional
            };
        }
        if let Some(budget) = lookup("TRANSIT_TIME_BUDGET_MS") {
            config.planner.time_budget_ms = parse_var("TRANSIT_TIME_BUDGET_MS", &budget)?;
        }
        if let Some(buffer) = lookup("TRANSIT_TRANSFER_BUFFER_MINS") {
            config.planner.transfer_buffer_mins =
                parse_var("TRANSIT_TRANSFER_BUFFER_MINS", &buffer)?;
        }
        if let Some(max) = lookup("TRANSIT_MAX_RESULTS") {
            config.planner.max_results = parse_var("TRANSIT_MAX_RESULTS", &max)?;
        }

        Ok(config)
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
