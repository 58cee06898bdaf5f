//! Trait definitions for the publisher module.

use async_trait::async_trait;
use std::path::Path;

use super::error::PublishError;

/// A successfully published artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArtifact {
    /// Storage key the artifact lives under.
    pub key: String,
    /// Artifact filename (the last key segment).
    pub name: String,
    /// Uploaded size in bytes.
    pub size_bytes: u64,
}

/// Uploads finished artifacts to durable storage.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Uploads `local` under `key`, overwriting any existing object at
    /// that key. Idempotent across retried attempts.
    async fn publish(&self, local: &Path, key: &str) -> Result<PublishedArtifact, PublishError>;
}
