//! Mock publisher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::publisher::{PublishError, PublishedArtifact, Publisher};

/// Mock implementation of the Publisher trait.
///
/// Stores uploaded objects in memory keyed by storage key, so tests
/// can assert on what was published and verify that a re-published key
/// overwrites rather than duplicates.
///
/// # Example
///
/// ```rust,ignore
/// use mediamill_core::testing::MockPublisher;
///
/// let publisher = MockPublisher::new();
/// // ... run the pipeline ...
/// assert!(publisher.object("My_Title/My_Title.mp4").await.is_some());
/// ```
#[derive(Debug)]
pub struct MockPublisher {
    /// Uploaded objects by key.
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    /// Keys in upload order, including overwrites.
    uploads: Arc<RwLock<Vec<String>>>,
    /// Number of upcoming uploads that must fail.
    fail_remaining: Arc<RwLock<u32>>,
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPublisher {
    /// Create a new mock publisher.
    pub fn new() -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            uploads: Arc::new(RwLock::new(Vec::new())),
            fail_remaining: Arc::new(RwLock::new(0)),
        }
    }

    /// Get the stored object for a key, if any.
    pub async fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).cloned()
    }

    /// Get the number of distinct keys stored.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Get every upload in order, including overwrites of the same key.
    pub async fn upload_log(&self) -> Vec<String> {
        self.uploads.read().await.clone()
    }

    /// Make the next `n` uploads fail.
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
impl Publisher for MockPublisher {
    async fn publish(&self, local: &Path, key: &str) -> Result<PublishedArtifact, PublishError> {
        if self.should_fail().await {
            return Err(PublishError::Transport {
                key: key.to_string(),
                message: "mock upload failure".to_string(),
            });
        }

        let bytes = tokio::fs::read(local)
            .await
            .map_err(|e| PublishError::Read {
                path: local.to_path_buf(),
                message: e.to_string(),
            })?;

        let size_bytes = bytes.len() as u64;
        self.objects
            .write()
            .await
            .insert(key.to_string(), bytes);
        self.uploads.write().await.push(key.to_string());

        let name = key.rsplit('/').next().unwrap_or(key).to_string();
        Ok(PublishedArtifact {
            key: key.to_string(),
            name,
            size_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_stores_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp4");
        tokio::fs::write(&path, b"artifact").await.unwrap();

        let publisher = MockPublisher::new();
        let published = publisher.publish(&path, "Title/a.mp4").await.unwrap();

        assert_eq!(published.name, "a.mp4");
        assert_eq!(published.size_bytes, 8);
        assert_eq!(publisher.object("Title/a.mp4").await.unwrap(), b"artifact");
    }

    #[tokio::test]
    async fn test_republish_overwrites_same_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp4");

        let publisher = MockPublisher::new();
        tokio::fs::write(&path, b"first").await.unwrap();
        publisher.publish(&path, "Title/a.mp4").await.unwrap();
        tokio::fs::write(&path, b"second").await.unwrap();
        publisher.publish(&path, "Title/a.mp4").await.unwrap();

        assert_eq!(publisher.object_count().await, 1);
        assert_eq!(publisher.object("Title/a.mp4").await.unwrap(), b"second");
        assert_eq!(publisher.upload_log().await.len(), 2);
    }

    #[tokio::test]
    async fn test_publish_missing_file_is_read_error() {
        let publisher = MockPublisher::new();
        let result = publisher
            .publish(Path::new("/nonexistent/a.mp4"), "Title/a.mp4")
            .await;
        assert!(matches!(result, Err(PublishError::Read { .. })));
    }
}
