//! Supported source languages.

use serde::{Deserialize, Serialize};

/// Languages the speech and translation collaborators accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
    Marathi,
    Gujarati,
}

impl Language {
    /// Language code expected by the cloud speech recognizer.
    pub fn recognizer_code(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Marathi => "mr-IN",
            Language::Gujarati => "gu-IN",
        }
    }

    /// Human-readable name, used in translation prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Marathi => "Marathi",
            Language::Gujarati => "Gujarati",
        }
    }

    /// Whether text in this language already needs no translation.
    pub fn is_english(&self) -> bool {
        matches!(self, Language::English)
    }
}
