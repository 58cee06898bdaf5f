//! Trait definitions for the transcoder module.

use async_trait::async_trait;

use super::error::TranscodeError;
use super::types::{TranscodeJob, TranscodeResult};

/// Executes single encoder invocations.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Runs one invocation described by the job's recipe, producing
    /// the job's output file or failing if the encoder exits non-zero.
    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscodeError>;

    /// Validates that the transcoder is ready (binary present).
    async fn validate(&self) -> Result<(), TranscodeError>;
}
