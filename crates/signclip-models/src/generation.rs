//! Generation request outcomes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A token paired with the clip it resolved to, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedWord {
    /// The normalized input token.
    pub token: String,
    /// Absolute path of the matched clip; `None` when the vocabulary has
    /// no entry for this token.
    pub clip_path: Option<PathBuf>,
}

impl ResolvedWord {
    pub fn matched(token: impl Into<String>, clip_path: PathBuf) -> Self {
        Self {
            token: token.into(),
            clip_path: Some(clip_path),
        }
    }

    pub fn unmatched(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            clip_path: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.clip_path.is_some()
    }
}

/// Result of one end-to-end sentence-to-video generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Absolute path of the generated video.
    pub output_path: PathBuf,
    /// File name under the output directory (`{uuid}.mp4`).
    pub file_name: String,
    /// Per-token resolution results, in input order.
    pub words: Vec<ResolvedWord>,
    /// Tokens that resolved to no clip and were skipped.
    pub unmatched: Vec<String>,
}

/// Result of a bulk cleanup of the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CleanupOutcome {
    /// The directory was swept; `deleted` lists the removed file names.
    Cleared { deleted: Vec<String> },
    /// The output directory does not exist; nothing to do.
    DirectoryMissing,
}

impl CleanupOutcome {
    /// Number of files removed.
    pub fn deleted_count(&self) -> usize {
        match self {
            CleanupOutcome::Cleared { deleted } => deleted.len(),
            CleanupOutcome::DirectoryMissing => 0,
        }
    }
}
