//! The generation orchestrator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::{OnceCell, Semaphore};
use tracing::{info, warn};
use uuid::Uuid;

use signclip_catalog::{ClipCatalog, WordResolver};
use signclip_media::{concatenate, MediaError};
use signclip_models::encoding::CLIP_EXTENSION;
use signclip_models::{CleanupOutcome, EncodingConfig, GenerationOutcome, ResolvedWord};

use crate::error::{GenerateError, GenerateResult};

/// Default ceiling on one FFmpeg encode, in seconds.
pub const DEFAULT_COMPOSE_TIMEOUT_SECS: u64 = 300;
/// Default number of encodes allowed to run at once.
pub const DEFAULT_COMPOSE_CONCURRENCY: usize = 2;

/// Orchestrator settings.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory generated videos are written to.
    pub output_dir: PathBuf,
    /// Compositor encoding settings.
    pub encoding: EncodingConfig,
    /// Ceiling on one encode, in seconds.
    pub compose_timeout_secs: u64,
    /// Concurrent encode permits. Set to 1 to strictly serialize the
    /// composing phase across requests.
    pub compose_concurrency: usize,
}

impl GeneratorConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            encoding: EncodingConfig::default(),
            compose_timeout_secs: DEFAULT_COMPOSE_TIMEOUT_SECS,
            compose_concurrency: DEFAULT_COMPOSE_CONCURRENCY,
        }
    }
}

/// Coordinates one sentence-to-video request end to end.
///
/// Request phases run in order: catalog check, tokenizing, resolving,
/// composing, verifying. Unresolved tokens are dropped, not fatal; a
/// request only fails outright when nothing resolves at all.
pub struct VideoGenerator {
    catalog: Arc<ClipCatalog>,
    resolver: WordResolver,
    config: GeneratorConfig,
    /// Bounds concurrent FFmpeg invocations across requests.
    encode_permits: Semaphore,
    /// Output directory is created and probe-checked once per process.
    output_dir_ready: OnceCell<()>,
}

impl VideoGenerator {
    pub fn new(catalog: Arc<ClipCatalog>, config: GeneratorConfig) -> Self {
        let permits = config.compose_concurrency.max(1);
        Self {
            resolver: WordResolver::new(Arc::clone(&catalog)),
            catalog,
            config,
            encode_permits: Semaphore::new(permits),
            output_dir_ready: OnceCell::new(),
        }
    }

    /// Generate one video for a cleaned English sentence.
    pub async fn generate(&self, sentence: &str) -> GenerateResult<GenerationOutcome> {
        // Catalog check. The catalog loads before the server accepts
        // requests, so this only trips after a reload went bad.
        if self.catalog.is_empty().await {
            return Err(GenerateError::CatalogUnavailable(
                "catalog holds no entries".to_string(),
            ));
        }

        let (words, clips) = self.resolve_sentence(sentence).await?;
        let unmatched: Vec<String> = words
            .iter()
            .filter(|w| !w.is_matched())
            .map(|w| w.token.clone())
            .collect();
        if !unmatched.is_empty() {
            warn!("No clips for {} word(s): {:?}", unmatched.len(), unmatched);
        }
        if clips.is_empty() {
            return Err(GenerateError::NoClipsResolved);
        }

        self.ensure_output_dir().await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), CLIP_EXTENSION);
        let output_path = self.config.output_dir.join(&file_name);

        // Composing. Permits bound how many encodes run at once; the
        // encode itself is atomic from this point on.
        {
            let _permit = self
                .encode_permits
                .acquire()
                .await
                .map_err(|_| GenerateError::Internal("encode gate closed".to_string()))?;

            info!(
                "Composing {} clips -> {}",
                clips.len(),
                output_path.display()
            );
            match concatenate(
                &clips,
                &output_path,
                &self.config.encoding,
                self.config.compose_timeout_secs,
            )
            .await
            {
                Ok(()) => {}
                Err(MediaError::Timeout(secs)) => {
                    return Err(GenerateError::CompositionTimeout(secs))
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.verify_output(&output_path).await?;

        info!("Generated {}", output_path.display());
        Ok(GenerationOutcome {
            output_path,
            file_name,
            words,
            unmatched,
        })
    }

    /// Tokenize a sentence and resolve every token, preserving order.
    ///
    /// Returns the per-token results alongside the ordered clip list
    /// (matched tokens only, possibly shorter than the token list).
    pub async fn resolve_sentence(
        &self,
        sentence: &str,
    ) -> GenerateResult<(Vec<ResolvedWord>, Vec<PathBuf>)> {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(GenerateError::EmptyInput);
        }

        let mut words = Vec::with_capacity(tokens.len());
        let mut clips = Vec::new();

        for token in tokens {
            match self.resolver.resolve(token).await? {
                Some(path) => {
                    clips.push(path.clone());
                    words.push(ResolvedWord::matched(token, path));
                }
                None => words.push(ResolvedWord::unmatched(token)),
            }
        }

        Ok((words, clips))
    }

    /// Create the output directory and verify it is writable.
    ///
    /// Runs the actual check once per process; later calls are free.
    /// The probe write is disposable and removed immediately.
    pub async fn ensure_output_dir(&self) -> GenerateResult<()> {
        self.output_dir_ready
            .get_or_try_init(|| async {
                let dir = &self.config.output_dir;
                fs::create_dir_all(dir).await.map_err(|e| {
                    GenerateError::OutputDirUnavailable(format!(
                        "cannot create {}: {e}",
                        dir.display()
                    ))
                })?;

                let probe = dir.join(format!(".probe-{}", Uuid::new_v4()));
                fs::write(&probe, b"probe").await.map_err(|e| {
                    GenerateError::OutputDirUnavailable(format!(
                        "{} is not writable: {e}",
                        dir.display()
                    ))
                })?;
                let _ = fs::remove_file(&probe).await;

                info!("Output directory ready: {}", dir.display());
                Ok(())
            })
            .await
            .map(|_| ())
    }

    /// Confirm the compositor's output exists and is non-empty.
    async fn verify_output(&self, output_path: &Path) -> GenerateResult<()> {
        match fs::metadata(output_path).await {
            Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
            _ => {
                // Whatever is there is not a valid result; never surface it.
                let _ = fs::remove_file(output_path).await;
                Err(GenerateError::OutputVerificationFailed(
                    output_path.to_path_buf(),
                ))
            }
        }
    }

    /// Delete every generated clip in the output directory.
    ///
    /// Separate entry point from generation. Only files carrying the
    /// clip extension are touched. An absent directory is a no-op
    /// condition, not an error.
    pub async fn clear_generated(&self) -> GenerateResult<CleanupOutcome> {
        let dir = &self.config.output_dir;

        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(CleanupOutcome::DirectoryMissing);
            }
            Err(e) => return Err(e.into()),
        };

        let mut deleted = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_clip = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case(CLIP_EXTENSION))
                .unwrap_or(false);
            if !is_clip || !entry.file_type().await?.is_file() {
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => deleted.push(entry.file_name().to_string_lossy().to_string()),
                Err(e) => warn!("Failed to delete {}: {}", path.display(), e),
            }
        }

        info!("Cleanup removed {} generated clip(s)", deleted.len());
        Ok(CleanupOutcome::Cleared { deleted })
    }

    /// Output directory this generator writes to.
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// The catalog backing this generator.
    pub fn catalog(&self) -> &Arc<ClipCatalog> {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn dataset_with(words: &[&str]) -> (TempDir, Arc<ClipCatalog>) {
        let dir = TempDir::new().unwrap();
        for word in words {
            let word_dir = dir.path().join(word);
            fs::create_dir_all(&word_dir).await.unwrap();
            fs::write(word_dir.join(format!("{word}.mp4")), b"stub")
                .await
                .unwrap();
        }
        let catalog = Arc::new(ClipCatalog::load(dir.path()).await.unwrap());
        (dir, catalog)
    }

    fn generator_for(catalog: Arc<ClipCatalog>, output_root: &Path) -> VideoGenerator {
        VideoGenerator::new(
            catalog,
            GeneratorConfig::new(output_root.join("generated")),
        )
    }

    #[tokio::test]
    async fn test_empty_sentence_is_empty_input() {
        let (_data, catalog) = dataset_with(&["hello"]).await;
        let out = TempDir::new().unwrap();
        let generator = generator_for(catalog, out.path());

        assert!(matches!(
            generator.generate("").await.unwrap_err(),
            GenerateError::EmptyInput
        ));
        assert!(matches!(
            generator.generate("   \t ").await.unwrap_err(),
            GenerateError::EmptyInput
        ));
    }

    #[tokio::test]
    async fn test_no_vocabulary_overlap_fails_without_output() {
        let (_data, catalog) = dataset_with(&["hello", "world"]).await;
        let out = TempDir::new().unwrap();
        let generator = generator_for(catalog, out.path());

        let err = generator.generate("zzz qqq").await.unwrap_err();
        assert!(matches!(err, GenerateError::NoClipsResolved));

        // Request failed before composing: no output directory, no file.
        assert!(!out.path().join("generated").exists());
    }

    #[tokio::test]
    async fn test_resolution_preserves_length_and_order() {
        let (_data, catalog) = dataset_with(&["good", "morning", "friend"]).await;
        let out = TempDir::new().unwrap();
        let generator = generator_for(catalog, out.path());

        let (words, clips) = generator
            .resolve_sentence("friend good morning")
            .await
            .unwrap();

        assert_eq!(words.len(), 3);
        assert_eq!(clips.len(), 3);
        let names: Vec<_> = clips
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["friend.mp4", "good.mp4", "morning.mp4"]);
    }

    #[tokio::test]
    async fn test_unresolved_tokens_are_dropped_not_fatal() {
        let (_data, catalog) = dataset_with(&["good"]).await;
        let out = TempDir::new().unwrap();
        let generator = generator_for(catalog, out.path());

        let (words, clips) = generator.resolve_sentence("good zzz").await.unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(clips.len(), 1);
        assert!(words[0].is_matched());
        assert!(!words[1].is_matched());
    }

    #[tokio::test]
    async fn test_ensure_output_dir_creates_and_probes() {
        let (_data, catalog) = dataset_with(&["hello"]).await;
        let out = TempDir::new().unwrap();
        let generator = generator_for(catalog, out.path());

        generator.ensure_output_dir().await.unwrap();
        let dir = out.path().join("generated");
        assert!(dir.is_dir());

        // The probe write is disposable: nothing left behind.
        let mut entries = fs::read_dir(&dir).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());

        // Second call is the memoized fast path.
        generator.ensure_output_dir().await.unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_deletes_only_clips_and_reports_count() {
        let (_data, catalog) = dataset_with(&["hello"]).await;
        let out = TempDir::new().unwrap();
        let generator = generator_for(catalog, out.path());

        let dir = out.path().join("generated");
        fs::create_dir_all(&dir).await.unwrap();
        fs::write(dir.join("a.mp4"), b"x").await.unwrap();
        fs::write(dir.join("b.mp4"), b"x").await.unwrap();
        fs::write(dir.join("notes.txt"), b"x").await.unwrap();

        let outcome = generator.clear_generated().await.unwrap();
        assert_eq!(outcome.deleted_count(), 2);
        assert!(dir.join("notes.txt").exists());

        // Idempotent: an immediate second sweep finds nothing.
        let outcome = generator.clear_generated().await.unwrap();
        assert_eq!(outcome.deleted_count(), 0);
    }

    #[tokio::test]
    async fn test_cleanup_missing_directory_is_not_an_error() {
        let (_data, catalog) = dataset_with(&["hello"]).await;
        let out = TempDir::new().unwrap();
        let generator = generator_for(catalog, out.path());

        let outcome = generator.clear_generated().await.unwrap();
        assert!(matches!(outcome, CleanupOutcome::DirectoryMissing));
    }
}
