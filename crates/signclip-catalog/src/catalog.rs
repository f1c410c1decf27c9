//! The clip catalog: dataset scan and in-memory index.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use signclip_models::encoding::CLIP_EXTENSION;

use crate::error::{CatalogError, CatalogResult};

/// Word key to clip path. A `BTreeMap` so iteration (and therefore the
/// resolver's fallback scan) follows lexicographic key order.
pub type CatalogIndex = BTreeMap<String, PathBuf>;

/// In-memory index of the clip dataset.
///
/// Built once from the dataset directory at startup; the index is a
/// read-only snapshot shared by all requests. [`ClipCatalog::reload`]
/// rescans the dataset and swaps the snapshot atomically, leaving
/// in-flight requests on the snapshot they already hold.
///
/// The catalog is a stale-tolerant cache: membership does not guarantee
/// the file is still on disk. Consumers re-verify at use.
#[derive(Debug)]
pub struct ClipCatalog {
    dataset_root: PathBuf,
    index: RwLock<Arc<CatalogIndex>>,
}

impl ClipCatalog {
    /// Scan `dataset_root` and build the catalog.
    ///
    /// Each immediate subdirectory contributes one entry: the lowercased,
    /// trimmed directory name maps to the first `.mp4` file inside it
    /// (lexicographically first, so the pick is deterministic).
    /// Subdirectories without a usable clip are skipped with a warning.
    ///
    /// Fails when the root is missing or when the scan finds zero entries.
    pub async fn load(dataset_root: impl AsRef<Path>) -> CatalogResult<Self> {
        let dataset_root = dataset_root.as_ref().to_path_buf();
        let index = scan_dataset(&dataset_root).await?;

        info!(
            "Clip catalog ready: {} entries from {}",
            index.len(),
            dataset_root.display()
        );

        Ok(Self {
            dataset_root,
            index: RwLock::new(Arc::new(index)),
        })
    }

    /// Exact-match lookup. No on-disk re-verification happens here; the
    /// resolver owns that concern.
    pub async fn lookup(&self, key: &str) -> Option<PathBuf> {
        self.index.read().await.get(key).cloned()
    }

    /// A shared snapshot of the whole index, for fallback scans.
    pub async fn snapshot(&self) -> Arc<CatalogIndex> {
        Arc::clone(&*self.index.read().await)
    }

    /// Number of vocabulary entries.
    pub async fn len(&self) -> usize {
        self.index.read().await.len()
    }

    /// Whether the catalog holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.index.read().await.is_empty()
    }

    /// Rescan the dataset and swap in the fresh index.
    ///
    /// Returns the new entry count. On scan failure the current index is
    /// left untouched.
    pub async fn reload(&self) -> CatalogResult<usize> {
        let fresh = scan_dataset(&self.dataset_root).await?;
        let count = fresh.len();
        *self.index.write().await = Arc::new(fresh);
        info!("Clip catalog reloaded: {} entries", count);
        Ok(count)
    }

    /// Root of the dataset this catalog was built from.
    pub fn dataset_root(&self) -> &Path {
        &self.dataset_root
    }
}

/// Scan the dataset directory into an index.
async fn scan_dataset(dataset_root: &Path) -> CatalogResult<CatalogIndex> {
    let root_meta = fs::metadata(dataset_root).await;
    if !root_meta.map(|m| m.is_dir()).unwrap_or(false) {
        return Err(CatalogError::DatasetMissing(dataset_root.to_path_buf()));
    }

    let mut index = CatalogIndex::new();
    let mut entries = fs::read_dir(dataset_root).await?;

    while let Some(entry) = entries.next_entry().await? {
        let dir_path = entry.path();
        if !entry.file_type().await?.is_dir() {
            continue;
        }

        let key = entry.file_name().to_string_lossy().trim().to_lowercase();
        if key.is_empty() {
            continue;
        }

        match first_clip_in(&dir_path).await? {
            Some(clip_path) => {
                debug!("Mapped \"{}\" -> {}", key, clip_path.display());
                index.insert(key, clip_path);
            }
            None => {
                warn!("No {} clip in {}, skipping", CLIP_EXTENSION, dir_path.display());
            }
        }
    }

    if index.is_empty() {
        return Err(CatalogError::DatasetEmpty(dataset_root.to_path_buf()));
    }

    Ok(index)
}

/// Lexicographically first accessible clip file in a vocabulary directory.
async fn first_clip_in(dir: &Path) -> CatalogResult<Option<PathBuf>> {
    let mut clips: Vec<PathBuf> = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_clip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(CLIP_EXTENSION))
            .unwrap_or(false);
        if is_clip && fs::metadata(&path).await.map(|m| m.is_file()).unwrap_or(false) {
            clips.push(path);
        }
    }

    clips.sort();
    Ok(clips.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn make_entry(root: &Path, word: &str, clip_name: &str) {
        let dir = root.join(word);
        fs::create_dir_all(&dir).await.unwrap();
        fs::write(dir.join(clip_name), b"stub video").await.unwrap();
    }

    #[tokio::test]
    async fn test_load_builds_lowercase_index() {
        let dir = TempDir::new().unwrap();
        make_entry(dir.path(), "Hello", "hello.mp4").await;
        make_entry(dir.path(), "world", "world.mp4").await;

        let catalog = ClipCatalog::load(dir.path()).await.unwrap();
        assert_eq!(catalog.len().await, 2);
        assert!(catalog.lookup("hello").await.is_some());
        assert!(catalog.lookup("Hello").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_dataset_fails() {
        let dir = TempDir::new().unwrap();
        let err = ClipCatalog::load(dir.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, CatalogError::DatasetMissing(_)));
    }

    #[tokio::test]
    async fn test_empty_dataset_fails() {
        let dir = TempDir::new().unwrap();
        let err = ClipCatalog::load(dir.path()).await.unwrap_err();
        assert!(matches!(err, CatalogError::DatasetEmpty(_)));
    }

    #[tokio::test]
    async fn test_directories_without_clips_are_skipped() {
        let dir = TempDir::new().unwrap();
        make_entry(dir.path(), "good", "good.mp4").await;
        fs::create_dir_all(dir.path().join("empty")).await.unwrap();
        fs::write(dir.path().join("empty").join("notes.txt"), b"x")
            .await
            .unwrap();

        let catalog = ClipCatalog::load(dir.path()).await.unwrap();
        assert_eq!(catalog.len().await, 1);
        assert!(catalog.lookup("empty").await.is_none());
    }

    #[tokio::test]
    async fn test_plain_files_under_root_are_ignored() {
        let dir = TempDir::new().unwrap();
        make_entry(dir.path(), "good", "good.mp4").await;
        fs::write(dir.path().join("stray.mp4"), b"x").await.unwrap();

        let catalog = ClipCatalog::load(dir.path()).await.unwrap();
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn test_first_clip_pick_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let word_dir = dir.path().join("hello");
        fs::create_dir_all(&word_dir).await.unwrap();
        fs::write(word_dir.join("b.mp4"), b"x").await.unwrap();
        fs::write(word_dir.join("a.mp4"), b"x").await.unwrap();

        let catalog = ClipCatalog::load(dir.path()).await.unwrap();
        let path = catalog.lookup("hello").await.unwrap();
        assert_eq!(path.file_name().unwrap(), "a.mp4");
    }

    #[tokio::test]
    async fn test_load_is_idempotent_over_unchanged_dataset() {
        let dir = TempDir::new().unwrap();
        make_entry(dir.path(), "one", "one.mp4").await;
        make_entry(dir.path(), "two", "two.mp4").await;

        let first = ClipCatalog::load(dir.path()).await.unwrap();
        let second = ClipCatalog::load(dir.path()).await.unwrap();
        assert_eq!(*first.snapshot().await, *second.snapshot().await);
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_entries() {
        let dir = TempDir::new().unwrap();
        make_entry(dir.path(), "one", "one.mp4").await;

        let catalog = ClipCatalog::load(dir.path()).await.unwrap();
        let before = catalog.snapshot().await;
        assert_eq!(catalog.len().await, 1);

        make_entry(dir.path(), "two", "two.mp4").await;
        assert_eq!(catalog.reload().await.unwrap(), 2);
        assert!(catalog.lookup("two").await.is_some());

        // The pre-reload snapshot is unaffected.
        assert_eq!(before.len(), 1);
    }
}
