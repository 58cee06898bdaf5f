//! Error types for the publisher module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while publishing an artifact.
#[derive(Debug, Error)]
pub enum PublishError {
    /// No storage bucket configured.
    #[error("No storage bucket configured")]
    BucketNotConfigured,

    /// The local artifact does not exist or cannot be read.
    #[error("Failed to read artifact {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// The upload could not complete.
    #[error("Upload failed for key {key}: {message}")]
    Transport { key: String, message: String },
}
