//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use signclip_engine::GenerateError;
use signclip_speech::SpeechError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Speech(#[from] SpeechError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Generate(e) => match e {
                GenerateError::EmptyInput | GenerateError::NoClipsResolved => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                GenerateError::CatalogUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Speech(e) => match e {
                SpeechError::InvalidAudio(_)
                | SpeechError::UnsupportedFormat(_)
                | SpeechError::EmptyAudio => StatusCode::BAD_REQUEST,
                SpeechError::EmptyTranscript => StatusCode::UNPROCESSABLE_ENTITY,
                SpeechError::MissingApiKey(_) => StatusCode::INTERNAL_SERVER_ERROR,
                SpeechError::RequestFailed(_) | SpeechError::InvalidResponse(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
        }
    }

    /// Stable kind tag callers can branch on.
    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "ValidationError",
            ApiError::NotFound(_) => "NotFound",
            ApiError::Internal(_) => "Internal",
            ApiError::Generate(e) => match e {
                GenerateError::CatalogUnavailable(_) => "CatalogUnavailable",
                GenerateError::EmptyInput => "EmptyInput",
                GenerateError::NoClipsResolved => "NoClipsResolved",
                GenerateError::OutputDirUnavailable(_) => "OutputDirUnavailable",
                GenerateError::CompositionTimeout(_) => "CompositionTimeout",
                GenerateError::Composition(_) => "CompositionFailed",
                GenerateError::Catalog(_) => "CatalogError",
                GenerateError::OutputVerificationFailed(_) => "OutputVerificationFailed",
                GenerateError::Internal(_) | GenerateError::Io(_) => "Internal",
            },
            ApiError::Speech(e) => match e {
                SpeechError::InvalidAudio(_) => "InvalidAudio",
                SpeechError::UnsupportedFormat(_) => "UnsupportedFormat",
                SpeechError::EmptyAudio => "EmptyAudio",
                SpeechError::EmptyTranscript => "EmptyTranscript",
                SpeechError::MissingApiKey(_) => "Internal",
                SpeechError::RequestFailed(_) => "CollaboratorFailed",
                SpeechError::InvalidResponse(_) => "CollaboratorFailed",
            },
        }
    }

    /// Short caller-facing summary, separate from the details.
    fn summary(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "Invalid request",
            ApiError::NotFound(_) => "Not found",
            ApiError::Internal(_) => "Internal error",
            ApiError::Generate(_) => "Video generation failed",
            ApiError::Speech(_) => "Speech processing failed",
        }
    }
}

/// Error body shape: `{ error, type, details }`.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(rename = "type")]
    kind: String,
    details: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let details = if status.is_server_error()
            && std::env::var("ENVIRONMENT").unwrap_or_default() == "production"
        {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: self.summary().to_string(),
            kind: self.kind().to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_map_to_unprocessable() {
        let err = ApiError::from(GenerateError::NoClipsResolved);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "NoClipsResolved");

        let err = ApiError::from(GenerateError::EmptyInput);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_catalog_unavailable_maps_to_503() {
        let err = ApiError::from(GenerateError::CatalogUnavailable("empty".into()));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_collaborator_failures_map_to_bad_gateway() {
        let err = ApiError::from(SpeechError::request_failed("down"));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.kind(), "CollaboratorFailed");
    }
}
