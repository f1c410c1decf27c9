//! Error types for generation requests.

use std::path::PathBuf;
use thiserror::Error;

use signclip_catalog::CatalogError;
use signclip_media::MediaError;

/// Result type for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that terminate a generation request.
///
/// None of these are retried automatically. Each distinguishes
/// "fix your input" (`EmptyInput`, `NoClipsResolved`) from "system
/// unavailable" (everything else).
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Clip catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Input sentence contains no words")]
    EmptyInput,

    #[error("No clips resolved for any word in the sentence")]
    NoClipsResolved,

    #[error("Output directory unavailable: {0}")]
    OutputDirUnavailable(String),

    #[error("Composition timed out after {0} seconds")]
    CompositionTimeout(u64),

    #[error("Composition failed: {0}")]
    Composition(#[from] MediaError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Output verification failed: {0}")]
    OutputVerificationFailed(PathBuf),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerateError {
    /// Whether the caller can recover by rephrasing their input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::NoClipsResolved)
    }
}
