//! Video generation and cleanup handlers.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use signclip_models::{clean_sentence, CleanupOutcome};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Generation request body.
#[derive(Deserialize)]
pub struct GenerateVideoRequest {
    pub sentence: Option<String>,
}

/// Generation response.
#[derive(Serialize)]
pub struct GenerateVideoResponse {
    pub success: bool,
    /// URL path the generated video is served from.
    pub video_url: String,
    pub file_name: String,
    /// Tokens in input order with their match status.
    pub words: Vec<WordResult>,
    /// Tokens that resolved to no clip and were skipped.
    pub unmatched: Vec<String>,
}

#[derive(Serialize)]
pub struct WordResult {
    pub token: String,
    pub matched: bool,
}

/// Generate a sign-language video for a sentence.
pub async fn generate_video(
    State(state): State<AppState>,
    Json(request): Json<GenerateVideoRequest>,
) -> ApiResult<Json<GenerateVideoResponse>> {
    let sentence = request
        .sentence
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("The request must include a sentence"))?;

    // Normalize here so callers may send raw text; already-clean text
    // passes through unchanged.
    let cleaned = clean_sentence(sentence);

    info!("Generating video for sentence: \"{}\"", cleaned);
    let start = Instant::now();

    let outcome = match state.generator.generate(&cleaned).await {
        Ok(outcome) => outcome,
        Err(e) => {
            metrics::record_generation("failed", 0, start.elapsed().as_secs_f64());
            return Err(e.into());
        }
    };

    let clip_count = outcome.words.iter().filter(|w| w.is_matched()).count();
    metrics::record_generation("ok", clip_count, start.elapsed().as_secs_f64());

    Ok(Json(GenerateVideoResponse {
        success: true,
        video_url: format!("/generated/{}", outcome.file_name),
        file_name: outcome.file_name,
        words: outcome
            .words
            .iter()
            .map(|w| WordResult {
                token: w.token.clone(),
                matched: w.is_matched(),
            })
            .collect(),
        unmatched: outcome.unmatched,
    }))
}

/// Cleanup response.
#[derive(Serialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub deleted: usize,
    pub files: Vec<String>,
}

/// Delete all generated videos.
pub async fn clear_generated(
    State(state): State<AppState>,
) -> ApiResult<Json<CleanupResponse>> {
    match state.generator.clear_generated().await? {
        CleanupOutcome::Cleared { deleted } => Ok(Json(CleanupResponse {
            success: true,
            deleted: deleted.len(),
            files: deleted,
        })),
        CleanupOutcome::DirectoryMissing => {
            Err(ApiError::not_found("Generated videos directory not found"))
        }
    }
}

/// Catalog reload response.
#[derive(Serialize)]
pub struct ReloadCatalogResponse {
    pub success: bool,
    pub entries: usize,
}

/// Rescan the dataset and swap in the fresh catalog index.
pub async fn reload_catalog(
    State(state): State<AppState>,
) -> ApiResult<Json<ReloadCatalogResponse>> {
    let entries = state
        .generator
        .catalog()
        .reload()
        .await
        .map_err(signclip_engine::GenerateError::from)?;
    Ok(Json(ReloadCatalogResponse {
        success: true,
        entries,
    }))
}
