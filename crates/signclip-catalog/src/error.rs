//! Error types for catalog operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Dataset directory not found: {0}")]
    DatasetMissing(PathBuf),

    #[error("Dataset at {0} contains no usable clips")]
    DatasetEmpty(PathBuf),

    #[error("Cannot resolve an empty token")]
    EmptyToken,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
