//! Speech transcription and translation handlers.
//!
//! Thin HTTP wrappers over the collaborator clients. Clients are built
//! per request from the environment, so a missing API key only affects
//! these endpoints, never video generation.

use axum::Json;
use serde::{Deserialize, Serialize};

use signclip_models::Language;
use signclip_speech::{SpeechClient, TranslationClient};

use crate::error::ApiResult;

/// Transcription request body.
#[derive(Deserialize)]
pub struct TranscribeRequest {
    /// Recorded audio as a `data:audio/...;base64,...` URI.
    pub audio_data_uri: String,
    pub language: Language,
}

/// Transcription response.
#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
}

/// Transcribe recorded audio.
pub async fn transcribe(
    Json(request): Json<TranscribeRequest>,
) -> ApiResult<Json<TranscribeResponse>> {
    let client = SpeechClient::from_env()?;
    let transcript = client
        .transcribe(&request.audio_data_uri, request.language)
        .await?;
    Ok(Json(TranscribeResponse { transcript }))
}

/// Translation request body.
#[derive(Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub language: Language,
}

/// Translation response.
#[derive(Serialize)]
pub struct TranslateResponse {
    pub english_text: String,
}

/// Translate text to English. English input is returned unchanged.
pub async fn translate(
    Json(request): Json<TranslateRequest>,
) -> ApiResult<Json<TranslateResponse>> {
    if request.language.is_english() {
        return Ok(Json(TranslateResponse {
            english_text: request.text,
        }));
    }

    let client = TranslationClient::from_env()?;
    let english_text = client
        .translate_to_english(&request.text, request.language)
        .await?;
    Ok(Json(TranslateResponse { english_text }))
}
