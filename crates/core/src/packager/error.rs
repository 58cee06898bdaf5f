//! Error types for the packager module.

use std::path::PathBuf;
use thiserror::Error;

use crate::transcoder::TranscodeError;

/// Errors that can occur while packaging the adaptive ladder.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// Encoding one rendition failed; the whole package is aborted.
    #[error("Rendition {height}p failed: {source}")]
    RenditionFailed {
        height: u32,
        #[source]
        source: TranscodeError,
    },

    /// The package directory could not be created.
    #[error("Failed to create package directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The master manifest could not be written.
    #[error("Failed to write master playlist: {path}")]
    ManifestWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
