//! Error type for pipeline attempts.

use thiserror::Error;

use crate::fetcher::FetchError;
use crate::packager::PackagingError;
use crate::publisher::PublishError;
use crate::transcoder::TranscodeError;

/// Any failure that aborts one pipeline attempt.
///
/// Every variant is handed to the retry loop; whatever survives the
/// final attempt is recorded verbatim as the job's failure detail.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source or subtitle acquisition failed.
    #[error("Acquisition failed: {0}")]
    Acquisition(#[from] FetchError),

    /// An encoder invocation failed.
    #[error("Transcode failed: {0}")]
    Transcode(#[from] TranscodeError),

    /// Adaptive-ladder packaging failed.
    #[error("Packaging failed: {0}")]
    Packaging(#[from] PackagingError),

    /// An artifact upload failed.
    #[error("Publish failed: {0}")]
    Publish(#[from] PublishError),

    /// The workspace could not be created.
    #[error("Workspace error: {0}")]
    Workspace(#[from] std::io::Error),
}
