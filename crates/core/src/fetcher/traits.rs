//! Trait definitions for the fetcher module.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::error::FetchError;

/// A successfully acquired input file.
#[derive(Debug, Clone)]
pub struct FetchedFile {
    /// Local path the resource was written to.
    pub path: PathBuf,
    /// Bytes written.
    pub size_bytes: u64,
}

/// Acquires a remote resource into a local file.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Streams `url` into `dest`, failing on transport errors or a
    /// non-success remote status. `dest` is overwritten if present.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<FetchedFile, FetchError>;
}
