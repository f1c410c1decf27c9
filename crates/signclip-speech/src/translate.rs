//! LLM-backed translation to English.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use signclip_models::Language;

use crate::error::{SpeechError, SpeechResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const TRANSLATION_MODEL: &str = "gemini-2.0-flash";

/// LLM API request.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// LLM API response.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Client for the translate-to-English collaborator.
pub struct TranslationClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl TranslationClient {
    /// Create a client reading `TRANSLATE_API_KEY` from the environment.
    pub fn from_env() -> SpeechResult<Self> {
        let api_key = std::env::var("TRANSLATE_API_KEY")
            .map_err(|_| SpeechError::MissingApiKey("TRANSLATE_API_KEY".to_string()))?;
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

    /// Override the LLM endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Translate `text` from `source` into English.
    ///
    /// English input is returned unchanged without any network call.
    pub async fn translate_to_english(
        &self,
        text: &str,
        source: Language,
    ) -> SpeechResult<String> {
        if source.is_english() {
            return Ok(text.to_string());
        }

        info!("Translating {} text to English", source.display_name());

        let prompt = build_translate_prompt(text, source);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, TRANSLATION_MODEL, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SpeechError::request_failed(format!("translation request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::request_failed(format!(
                "translator returned {status}: {body}"
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::invalid_response(format!("translator response: {e}")))?;

        let english = generated
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SpeechError::invalid_response("no content in translator response"))?;

        Ok(english.to_string())
    }
}

fn build_translate_prompt(text: &str, source: Language) -> String {
    format!(
        "You are an expert translation service. Translate the following {} text \
         accurately into English. Reply with the English translation only, no \
         commentary.\n\nSource text ({}):\n{}",
        source.display_name(),
        source.display_name(),
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_english_passes_through_without_network() {
        // Unroutable endpoint: any request attempt would error out.
        let client = TranslationClient::new("test-key").with_base_url("http://127.0.0.1:1");
        let out = client
            .translate_to_english("hello world", Language::English)
            .await
            .unwrap();
        assert_eq!(out, "hello world");
    }

    #[tokio::test]
    async fn test_translates_non_english() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [ { "text": "good morning\n" } ] } }
                ]
            })))
            .mount(&server)
            .await;

        let client = TranslationClient::new("test-key").with_base_url(server.uri());
        let out = client
            .translate_to_english("suprabhat", Language::Hindi)
            .await
            .unwrap();
        assert_eq!(out, "good morning");
    }

    #[tokio::test]
    async fn test_empty_candidates_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = TranslationClient::new("test-key").with_base_url(server.uri());
        let err = client
            .translate_to_english("namaste", Language::Marathi)
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::InvalidResponse(_)));
    }
}
