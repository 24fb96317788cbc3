//! Catalog loading from JSON.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::error::CatalogError;
use super::line::{Line, ServiceClass};
use crate::domain::{ClockTime, LineId};

/// One line as it appears in the catalog file.
#[derive(Debug, Deserialize)]
struct LineRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
    stops: Vec<String>,
    #[serde(default)]
    timings: Vec<String>,
    #[serde(default)]
    service_class: ServiceClass,
}

impl LineRecord {
    fn into_line(self) -> Result<Line, CatalogError> {
        let timings = self
            .timings
            .iter()
            .map(|raw| {
                ClockTime::parse(raw).map_err(|e| {
                    CatalogError::malformed(&self.id, format!("timing {raw:?}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Line {
            id: LineId::new(self.id),
            name: self.name,
            stops: self.stops,
            timings,
            service_class: self.service_class,
        })
    }
}

/// The full set of lines published by the transit operator.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    lines: Vec<Line>,
}

impl Catalog {
    /// Parse a catalog from a JSON array of line records.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_server::catalog::{Catalog, ServiceClass};
    ///
    /// let json = r#"[
    ///     {"id": "S-2", "stops": ["Kudghat", "Tollygunge"], "timings": ["8:00 AM"]},
    ///     {"id": "AC-1", "stops": ["South City", "Rashbihari"],
    ///      "service_class": "air_conditioned"}
    /// ]"#;
    ///
    /// let catalog = Catalog::from_json_str(json).unwrap();
    /// assert_eq!(catalog.len(), 2);
    /// assert_eq!(catalog.lines()[1].service_class, ServiceClass::AirConditioned);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<LineRecord> = serde_json::from_str(json)?;
        let lines = records
            .into_iter()
            .map(LineRecord::into_line)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lines })
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            lines = catalog.len(),
            "loaded transit catalog"
        );
        Ok(catalog)
    }

    /// The lines in catalog order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Consume the catalog, returning its lines.
    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the catalog has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
