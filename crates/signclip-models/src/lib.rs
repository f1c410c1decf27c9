//! Shared data models for the SignClip backend.
//!
//! This crate provides Serde-serializable types for:
//! - Source languages and their cloud recognizer codes
//! - Encoding configuration for the clip compositor
//! - Word resolution and generation outcomes
//! - Deterministic sentence normalization

pub mod encoding;
pub mod generation;
pub mod language;
pub mod normalize;

// Re-export common types
pub use encoding::EncodingConfig;
pub use generation::{CleanupOutcome, GenerationOutcome, ResolvedWord};
pub use language::Language;
pub use normalize::clean_sentence;
