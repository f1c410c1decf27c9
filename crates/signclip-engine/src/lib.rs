//! Sentence-to-video generation orchestrator.
//!
//! Coordinates catalog readiness, per-word resolution, clip composition,
//! output verification, and output-directory lifecycle for one
//! end-to-end request.

pub mod error;
pub mod generator;

pub use error::{GenerateError, GenerateResult};
pub use generator::{GeneratorConfig, VideoGenerator};
