//! Mock fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, FetchedFile, Fetcher};

/// A recorded fetch for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedFetch {
    /// URL that was requested.
    pub url: String,
    /// Destination path the content was written to.
    pub dest: PathBuf,
    /// Whether the fetch succeeded.
    pub success: bool,
}

/// Mock implementation of the Fetcher trait.
///
/// Provides controllable behavior for testing:
/// - Track fetch calls for assertions
/// - Serve configurable content per URL (written to `dest` for real)
/// - Fail the first N fetches to exercise retry paths
///
/// # Example
///
/// ```rust,ignore
/// use mediamill_core::testing::MockFetcher;
///
/// let fetcher = MockFetcher::new();
/// fetcher.set_content("http://host/video.mkv", b"fake media".to_vec()).await;
/// fetcher.fail_next(2).await; // first two calls return HTTP 503
/// ```
#[derive(Debug)]
pub struct MockFetcher {
    /// Recorded fetches.
    fetches: Arc<RwLock<Vec<RecordedFetch>>>,
    /// Pre-configured content by URL.
    content: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    /// Number of upcoming fetches that must fail.
    fail_remaining: Arc<RwLock<u32>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self {
            fetches: Arc::new(RwLock::new(Vec::new())),
            content: Arc::new(RwLock::new(HashMap::new())),
            fail_remaining: Arc::new(RwLock::new(0)),
        }
    }

    /// Get all recorded fetches.
    pub async fn recorded_fetches(&self) -> Vec<RecordedFetch> {
        self.fetches.read().await.clone()
    }

    /// Get the number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }

    /// Set the content served for a URL.
    pub async fn set_content(&self, url: impl Into<String>, bytes: Vec<u8>) {
        self.content.write().await.insert(url.into(), bytes);
    }

    /// Make the next `n` fetches fail with HTTP 503.
    pub async fn fail_next(&self, n: u32) {
        *self.fail_remaining.write().await = n;
    }

    async fn should_fail(&self) -> bool {
        let mut remaining = self.fail_remaining.write().await;
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<FetchedFile, FetchError> {
        if self.should_fail().await {
            self.fetches.write().await.push(RecordedFetch {
                url: url.to_string(),
                dest: dest.to_path_buf(),
                success: false,
            });
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: 503,
            });
        }

        let bytes = self
            .content
            .read()
            .await
            .get(url)
            .cloned()
            .unwrap_or_else(|| b"mock content".to_vec());

        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|source| FetchError::Write {
                path: dest.to_path_buf(),
                source,
            })?;

        self.fetches.write().await.push(RecordedFetch {
            url: url.to_string(),
            dest: dest.to_path_buf(),
            success: true,
        });

        Ok(FetchedFile {
            path: dest.to_path_buf(),
            size_bytes: bytes.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_writes_configured_content() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("source");

        let fetcher = MockFetcher::new();
        fetcher
            .set_content("http://host/a.mkv", b"hello".to_vec())
            .await;

        let fetched = fetcher.fetch("http://host/a.mkv", &dest).await.unwrap();
        assert_eq!(fetched.size_bytes, 5);
        assert_eq!(tokio::fs::read(&dest).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_fail_next_then_recover() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("source");

        let fetcher = MockFetcher::new();
        fetcher.fail_next(1).await;

        let first = fetcher.fetch("http://host/a.mkv", &dest).await;
        assert!(matches!(
            first,
            Err(FetchError::HttpStatus { status: 503, .. })
        ));

        let second = fetcher.fetch("http://host/a.mkv", &dest).await;
        assert!(second.is_ok());

        let fetches = fetcher.recorded_fetches().await;
        assert_eq!(fetches.len(), 2);
        assert!(!fetches[0].success);
        assert!(fetches[1].success);
    }
}
