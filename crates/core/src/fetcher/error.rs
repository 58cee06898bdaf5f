//! Error types for the fetcher module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while acquiring a remote input.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote responded with a non-success status.
    #[error("Remote returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// The transfer could not be started or completed.
    #[error("Transfer failed for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The destination file could not be created or written.
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
