//! Application state.

use std::sync::Arc;

use signclip_catalog::{CatalogError, ClipCatalog};
use signclip_engine::{GeneratorConfig, VideoGenerator};
use signclip_models::EncodingConfig;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub generator: Arc<VideoGenerator>,
}

impl AppState {
    /// Create new application state.
    ///
    /// Loads the clip catalog before the server starts listening, so
    /// every request observes a ready catalog or the process never
    /// comes up.
    pub async fn new(config: ApiConfig) -> Result<Self, CatalogError> {
        let catalog = Arc::new(ClipCatalog::load(&config.dataset_dir).await?);

        let generator_config = GeneratorConfig {
            output_dir: config.output_dir.clone(),
            encoding: EncodingConfig::default(),
            compose_timeout_secs: config.compose_timeout_secs,
            compose_concurrency: config.compose_concurrency,
        };
        let generator = Arc::new(VideoGenerator::new(catalog, generator_config));

        Ok(Self { config, generator })
    }
}
