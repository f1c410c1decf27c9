//! Error types for collaborator calls.

use thiserror::Error;

/// Result type for speech and translation operations.
pub type SpeechResult<T> = Result<T, SpeechError>;

/// Errors from the speech and translation collaborators.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Invalid audio data URI: {0}")]
    InvalidAudio(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Audio payload is empty")]
    EmptyAudio,

    #[error("Recognizer returned no transcript")]
    EmptyTranscript,

    #[error("API key not configured: {0}")]
    MissingApiKey(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl SpeechError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
