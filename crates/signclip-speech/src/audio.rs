//! Audio data-URI parsing and validation.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{SpeechError, SpeechResult};

/// Validated audio extracted from a `data:audio/...;base64,...` URI.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    /// MIME type as declared in the URI (e.g. `audio/webm`).
    pub mime_type: String,
    /// Base64-encoded audio bytes, as the recognizer expects them.
    pub content: String,
}

impl AudioPayload {
    /// Parse and validate a data URI.
    ///
    /// Rejects URIs that are not `data:` scheme, declare a non-`audio/*`
    /// MIME type, are not base64-encoded, carry an empty payload, or
    /// carry bytes that do not decode as base64.
    pub fn from_data_uri(uri: &str) -> SpeechResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| SpeechError::InvalidAudio("missing data: scheme".to_string()))?;

        let (header, content) = rest
            .split_once(',')
            .ok_or_else(|| SpeechError::InvalidAudio("missing payload separator".to_string()))?;

        let mime_type = header
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        if !mime_type.starts_with("audio/") {
            return Err(SpeechError::UnsupportedFormat(mime_type));
        }

        if !header.split(';').any(|p| p.trim() == "base64") {
            return Err(SpeechError::InvalidAudio(
                "payload is not base64-encoded".to_string(),
            ));
        }

        if content.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        BASE64
            .decode(content)
            .map_err(|e| SpeechError::InvalidAudio(format!("base64 decode failed: {e}")))?;

        Ok(Self {
            mime_type,
            content: content.to_string(),
        })
    }
}
