//! Word-to-clip catalog and resolver.
//!
//! The catalog scans a dataset directory (one subdirectory per vocabulary
//! entry, each holding a single clip) into an in-memory index. The
//! resolver maps tokens to clip paths: exact match first, then a
//! deterministic substring fallback over the catalog keys.

pub mod catalog;
pub mod error;
pub mod resolver;

pub use catalog::{CatalogIndex, ClipCatalog};
pub use error::{CatalogError, CatalogResult};
pub use resolver::WordResolver;
