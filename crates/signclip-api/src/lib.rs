//! Axum HTTP API server.
//!
//! This crate provides:
//! - The sentence-to-video generation endpoint
//! - Bulk cleanup of generated videos
//! - Speech transcription and translation endpoints
//! - Static delivery of generated clips
//! - Rate limiting, security headers, and Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
