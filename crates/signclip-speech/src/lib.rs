//! Speech-to-text and translation collaborator clients.
//!
//! Thin reqwest clients around the two text-producing collaborators the
//! generation core consumes: a cloud speech recognizer (audio data URI ->
//! transcript) and an LLM translator (non-English text -> English).

pub mod audio;
pub mod error;
pub mod transcribe;
pub mod translate;

pub use audio::AudioPayload;
pub use error::{SpeechError, SpeechResult};
pub use transcribe::SpeechClient;
pub use translate::TranslationClient;
