//! Cloud speech recognizer client.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use signclip_models::Language;

use crate::audio::AudioPayload;
use crate::error::{SpeechError, SpeechResult};

const DEFAULT_BASE_URL: &str = "https://speech.googleapis.com";

/// Recognizer request.
#[derive(Debug, Serialize)]
struct RecognizeRequest {
    audio: RecognitionAudio,
    config: RecognitionConfig,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: String,
    sample_rate_hertz: u32,
    language_code: String,
    model: String,
    enable_automatic_punctuation: bool,
}

/// Recognizer response.
#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognitionAlternative {
    transcript: Option<String>,
}

/// Client for the cloud speech-to-text API.
///
/// Audio arrives as a browser-recorded WebM/Opus data URI; the recognizer
/// is told as much (48 kHz, automatic punctuation on).
pub struct SpeechClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl SpeechClient {
    /// Create a client reading `SPEECH_API_KEY` from the environment.
    pub fn from_env() -> SpeechResult<Self> {
        let api_key = std::env::var("SPEECH_API_KEY")
            .map_err(|_| SpeechError::MissingApiKey("SPEECH_API_KEY".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Override the recognizer endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Transcribe a recorded audio data URI in the given language.
    pub async fn transcribe(&self, audio_data_uri: &str, language: Language) -> SpeechResult<String> {
        let payload = AudioPayload::from_data_uri(audio_data_uri)?;

        info!(
            "Transcribing {} audio ({} base64 chars) as {}",
            payload.mime_type,
            payload.content.len(),
            language.recognizer_code()
        );

        let request = RecognizeRequest {
            audio: RecognitionAudio {
                content: payload.content,
            },
            config: RecognitionConfig {
                encoding: "WEBM_OPUS".to_string(),
                sample_rate_hertz: 48_000,
                language_code: language.recognizer_code().to_string(),
                model: "default".to_string(),
                enable_automatic_punctuation: true,
            },
        };

        let url = format!(
            "{}/v1/speech:recognize?key={}",
            self.base_url, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SpeechError::request_failed(format!("recognizer request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Recognizer returned {}: {}", status, body);
            return Err(SpeechError::request_failed(format!(
                "recognizer returned {status}: {body}"
            )));
        }

        let recognized: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::invalid_response(format!("recognizer response: {e}")))?;

        let transcript = recognized
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .filter_map(|a| a.transcript.as_deref())
            .collect::<Vec<_>>()
            .join(" ");

        if transcript.trim().is_empty() {
            return Err(SpeechError::EmptyTranscript);
        }

        info!("Transcription complete ({} chars)", transcript.len());
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn audio_uri() -> String {
        format!("data:audio/webm;base64,{}", BASE64.encode(b"opus"))
    }

    #[tokio::test]
    async fn test_transcribe_joins_result_alternatives() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/speech:recognize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    { "alternatives": [ { "transcript": "good" } ] },
                    { "alternatives": [ { "transcript": "morning" } ] }
                ]
            })))
            .mount(&server)
            .await;

        let client = SpeechClient::new("test-key").with_base_url(server.uri());
        let transcript = client
            .transcribe(&audio_uri(), Language::English)
            .await
            .unwrap();
        assert_eq!(transcript, "good morning");
    }

    #[tokio::test]
    async fn test_transcribe_empty_results_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/speech:recognize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = SpeechClient::new("test-key").with_base_url(server.uri());
        let err = client
            .transcribe(&audio_uri(), Language::Hindi)
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::EmptyTranscript));
    }

    #[tokio::test]
    async fn test_transcribe_http_error_surfaces_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/speech:recognize"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad encoding"))
            .mount(&server)
            .await;

        let client = SpeechClient::new("test-key").with_base_url(server.uri());
        let err = client
            .transcribe(&audio_uri(), Language::English)
            .await
            .unwrap_err();
        match err {
            SpeechError::RequestFailed(msg) => assert!(msg.contains("bad encoding")),
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_audio_never_hits_network() {
        // No mock mounted; any request would fail the test with a panic
        // inside reqwest, so an early validation error proves no call.
        let client = SpeechClient::new("test-key").with_base_url("http://127.0.0.1:1");
        let err = client
            .transcribe("data:video/mp4;base64,AAAA", Language::English)
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::UnsupportedFormat(_)));
    }
}
