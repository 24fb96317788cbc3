//! Transit catalog: the static list of bus lines the network is built from.
//!
//! The catalog is read once at startup, either from a JSON file or from
//! lines constructed in code, and is treated as authoritative. Only the
//! shape of the data is checked here; structural problems such as
//! single-stop lines are rejected when the graph is built.

mod error;
mod line;
mod load;

pub use error::CatalogError;
pub use line::{Line, ServiceClass};
pub use load::Catalog;
