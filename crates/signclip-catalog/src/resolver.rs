//! Token-to-clip resolution.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{debug, warn};

use crate::catalog::ClipCatalog;
use crate::error::{CatalogError, CatalogResult};

/// Resolves normalized tokens to clip paths.
///
/// Exact catalog lookup first, re-verified against the filesystem; when
/// that misses (or the entry has gone stale), a substring fallback scans
/// the catalog keys in lexicographic order and returns the first key
/// where either side contains the other and whose file still exists.
/// The fixed scan order makes fallback ties deterministic.
pub struct WordResolver {
    catalog: Arc<ClipCatalog>,
}

impl WordResolver {
    pub fn new(catalog: Arc<ClipCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve a token to a clip path.
    ///
    /// The token must be non-empty and already normalized (lowercase,
    /// trimmed). `Ok(None)` means the vocabulary has no usable match;
    /// that is not an error.
    pub async fn resolve(&self, token: &str) -> CatalogResult<Option<PathBuf>> {
        if token.is_empty() {
            return Err(CatalogError::EmptyToken);
        }

        // Exact match, re-verified on disk. A stale entry falls through
        // to the substring scan rather than failing the token outright.
        if let Some(path) = self.catalog.lookup(token).await {
            if file_exists(&path).await {
                debug!("Exact match for \"{}\": {}", token, path.display());
                return Ok(Some(path));
            }
            warn!(
                "Catalog entry for \"{}\" points at missing file {}",
                token,
                path.display()
            );
        }

        let snapshot = self.catalog.snapshot().await;
        for (key, path) in snapshot.iter() {
            if token.contains(key.as_str()) || key.contains(token) {
                if file_exists(path).await {
                    debug!(
                        "Fallback match for \"{}\": {} (via key \"{}\")",
                        token,
                        path.display(),
                        key
                    );
                    return Ok(Some(path.clone()));
                }
                warn!(
                    "Fallback candidate \"{}\" for \"{}\" missing on disk, continuing",
                    key, token
                );
            }
        }

        debug!("No match for \"{}\"", token);
        Ok(None)
    }
}

async fn file_exists(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn catalog_with(words: &[&str]) -> (TempDir, Arc<ClipCatalog>) {
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

    #[tokio::test]
    async fn test_exact_match() {
        let (_dir, catalog) = catalog_with(&["hello", "world"]).await;
        let resolver = WordResolver::new(catalog);

        let path = resolver.resolve("hello").await.unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "hello.mp4");
    }

    #[tokio::test]
    async fn test_exact_match_beats_substring_candidate() {
        // "no" is a substring of "north"; an exact "north" entry must win.
        let (_dir, catalog) = catalog_with(&["no", "north"]).await;
        let resolver = WordResolver::new(catalog);

        let path = resolver.resolve("north").await.unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "north.mp4");
    }

    #[tokio::test]
    async fn test_fallback_token_contains_key() {
        let (_dir, catalog) = catalog_with(&["sign"]).await;
        let resolver = WordResolver::new(catalog);

        let path = resolver.resolve("signing").await.unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "sign.mp4");
    }

    #[tokio::test]
    async fn test_fallback_key_contains_token() {
        let (_dir, catalog) = catalog_with(&["goodbye"]).await;
        let resolver = WordResolver::new(catalog);

        let path = resolver.resolve("good").await.unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "goodbye.mp4");
    }

    #[tokio::test]
    async fn test_fallback_ties_break_lexicographically() {
        // Both keys contain "an"; "anchor" sorts before "answer".
        let (_dir, catalog) = catalog_with(&["answer", "anchor"]).await;
        let resolver = WordResolver::new(catalog);

        let path = resolver.resolve("an").await.unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "anchor.mp4");
    }

    #[tokio::test]
    async fn test_no_match_is_none_not_error() {
        let (_dir, catalog) = catalog_with(&["hello"]).await;
        let resolver = WordResolver::new(catalog);

        assert!(resolver.resolve("xyz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_token_is_error() {
        let (_dir, catalog) = catalog_with(&["hello"]).await;
        let resolver = WordResolver::new(catalog);

        assert!(matches!(
            resolver.resolve("").await.unwrap_err(),
            CatalogError::EmptyToken
        ));
    }

    #[tokio::test]
    async fn test_stale_exact_entry_falls_through_to_fallback() {
        let (dir, catalog) = catalog_with(&["good", "goodbye"]).await;
        let resolver = WordResolver::new(catalog);

        // Remove the exact entry's file after the catalog was built.
        fs::remove_file(dir.path().join("good").join("good.mp4"))
            .await
            .unwrap();

        let path = resolver.resolve("good").await.unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "goodbye.mp4");
    }

    #[tokio::test]
    async fn test_all_entries_stale_resolves_to_none() {
        let (dir, catalog) = catalog_with(&["hello"]).await;
        let resolver = WordResolver::new(catalog);

        fs::remove_file(dir.path().join("hello").join("hello.mp4"))
            .await
            .unwrap();

        assert!(resolver.resolve("hello").await.unwrap().is_none());
    }
}
