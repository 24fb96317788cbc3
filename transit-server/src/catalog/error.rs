//! Catalog error types.

use std::path::PathBuf;

/// Errors raised while loading a catalog or building a graph from it.
///
/// Any of these should abort startup: a partially loaded catalog would give
/// a network that disagrees with the published one.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog was not valid JSON for the expected shape
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line's data cannot be turned into a consistent network
    #[error("malformed line {line}: {reason}")]
    Malformed { line: String, reason: String },
}

impl CatalogError {
    pub(crate) fn malformed(line: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::Malformed {
            line: line.into(),
            reason: reason.into(),
        }
    }
}
