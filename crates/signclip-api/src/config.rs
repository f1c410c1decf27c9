//! API configuration.

use std::path::PathBuf;

use signclip_engine::generator::{DEFAULT_COMPOSE_CONCURRENCY, DEFAULT_COMPOSE_TIMEOUT_SECS};

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second per client IP
    pub rate_limit_rps: u32,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Dataset root: one subdirectory per vocabulary entry
    pub dataset_dir: PathBuf,
    /// Directory generated videos are written to and served from
    pub output_dir: PathBuf,
    /// Ceiling on one compositor encode, in seconds
    pub compose_timeout_secs: u64,
    /// Concurrent compositor encodes allowed
    pub compose_concurrency: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 10,
            max_body_size: 25 * 1024 * 1024, // recorded audio payloads
            environment: "development".to_string(),
            dataset_dir: PathBuf::from("dataset"),
            output_dir: PathBuf::from("generated_videos"),
            compose_timeout_secs: DEFAULT_COMPOSE_TIMEOUT_SECS,
            compose_concurrency: DEFAULT_COMPOSE_CONCURRENCY,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_rps),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            dataset_dir: std::env::var("DATASET_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_dir),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            compose_timeout_secs: std::env::var("COMPOSE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.compose_timeout_secs),
            compose_concurrency: std::env::var("COMPOSE_CONCURRENCY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.compose_concurrency),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
