//! Mock transcoder for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::transcoder::{Recipe, TranscodeError, TranscodeJob, TranscodeResult, Transcoder};

/// A recorded transcode invocation for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTranscode {
    /// The invocation that was submitted.
    pub job: TranscodeJob,
    /// Whether the invocation succeeded.
    pub success: bool,
}

/// Mock implementation of the Transcoder trait.
///
/// Provides controllable behavior for testing:
/// - Track invocations (with their recipes) for ordering assertions
/// - Fail invocations whose recipe matches a predicate
/// - Fail the first N invocations to exercise retry paths
///
/// On success the mock writes a small placeholder file at the job's
/// output path so downstream stages can read real bytes.
///
/// # Example
///
/// ```rust,ignore
/// use mediamill_core::testing::MockTranscoder;
/// use mediamill_core::transcoder::Recipe;
///
/// let transcoder = MockTranscoder::new();
/// transcoder
///     .fail_when(|recipe| matches!(recipe, Recipe::PaletteGen { .. }))
///     .await;
/// ```
pub struct MockTranscoder {
    /// Recorded invocations.
    invocations: Arc<RwLock<Vec<RecordedTranscode>>>,
    /// Recipes matching this predicate fail.
    fail_predicate: Arc<RwLock<Option<Box<dyn Fn(&Recipe) -> bool + Send + Sync>>>>,
    /// Number of upcoming invocations that must fail.
    fail_remaining: Arc<RwLock<u32>>,
}

impl Default for MockTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscoder {
    /// Create a new mock transcoder.
    pub fn new() -> Self {
        Self {
            invocations: Arc::new(RwLock::new(Vec::new())),
            fail_predicate: Arc::new(RwLock::new(None)),
            fail_remaining: Arc::new(RwLock::new(0)),
        }
    }

    /// Get all recorded invocations.
    pub async fn recorded_transcodes(&self) -> Vec<RecordedTranscode> {
        self.invocations.read().await.clone()
    }

    /// Get the number of invocations performed.
    pub async fn transcode_count(&self) -> usize {
        self.invocations.read().await.len()
    }

    /// Get the recipes of all recorded invocations, in order.
    pub async fn recorded_recipes(&self) -> Vec<Recipe> {
        self.invocations
            .read()
            .await
            .iter()
            .map(|r| r.job.recipe.clone())
            .collect()
    }

    /// Fail every invocation whose recipe matches the predicate.
    pub async fn fail_when(
        &self,
        predicate: impl Fn(&Recipe) -> bool + Send + Sync + 'static,
    ) {
        *self.fail_predicate.write().await = Some(Box::new(predicate));
    }

    /// Clear the failure predicate.
    pub async fn clear_fail_when(&self) {
        *self.fail_predicate.write().await = None;
    }

    /// Make the next `n` invocations fail regardless of recipe.
    pub async fn fail_next(&self, n: u32) {
        *self.fail_remaining.write().await = n;
    }

    async fn should_fail(&self, recipe: &Recipe) -> bool {
        {
            let mut remaining = self.fail_remaining.write().await;
            if *remaining > 0 {
                *remaining -= 1;
                return true;
            }
        }
        if let Some(predicate) = self.fail_predicate.read().await.as_ref() {
            return predicate(recipe);
        }
        false
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscodeError> {
        if self.should_fail(&job.recipe).await {
            self.invocations.write().await.push(RecordedTranscode {
                job,
                success: false,
            });
            return Err(TranscodeError::failed(
                "mock transcode failure",
                Some("mock stderr".to_string()),
            ));
        }

        if let Some(parent) = job.output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Number the content per invocation so tests can tell which
        // run produced the bytes at an output path or storage key.
        let invocation = self.invocations.read().await.len() + 1;
        let contents = format!("mock artifact {}", invocation);
        tokio::fs::write(&job.output, contents.as_bytes()).await?;

        let output = job.output.clone();
        self.invocations.write().await.push(RecordedTranscode {
            job,
            success: true,
        });

        Ok(TranscodeResult {
            output,
            output_size_bytes: contents.len() as u64,
            duration_ms: 0,
        })
    }

    async fn validate(&self) -> Result<(), TranscodeError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::MP4_PROFILE;
    use std::path::PathBuf;

    fn container_job(dir: &std::path::Path, id: &str) -> TranscodeJob {
        TranscodeJob {
            job_id: id.to_string(),
            input: dir.join("source"),
            output: dir.join("out.mp4"),
            recipe: Recipe::Container {
                profile: MP4_PROFILE,
                burn_subtitles: None,
            },
        }
    }

    #[tokio::test]
    async fn test_transcode_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder = MockTranscoder::new();

        let result = transcoder
            .transcode(container_job(dir.path(), "job-1"))
            .await
            .unwrap();
        assert!(result.output.exists());
        assert_eq!(transcoder.transcode_count().await, 1);
    }

    #[tokio::test]
    async fn test_fail_when_matches_recipe() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder = MockTranscoder::new();
        transcoder
            .fail_when(|recipe| matches!(recipe, Recipe::PaletteGen { .. }))
            .await;

        let failed = transcoder
            .transcode(TranscodeJob {
                job_id: "job-1".to_string(),
                input: dir.path().join("source"),
                output: dir.path().join("palette.png"),
                recipe: Recipe::PaletteGen {
                    start: 0.0,
                    duration: 3.0,
                },
            })
            .await;
        assert!(failed.is_err());

        let ok = transcoder.transcode(container_job(dir.path(), "job-1")).await;
        assert!(ok.is_ok());

        let recorded = transcoder.recorded_transcodes().await;
        assert!(!recorded[0].success);
        assert!(recorded[1].success);
    }

    #[tokio::test]
    async fn test_fail_next_counts_down() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder = MockTranscoder::new();
        transcoder.fail_next(1).await;

        assert!(transcoder
            .transcode(container_job(dir.path(), "job-1"))
            .await
            .is_err());
        assert!(transcoder
            .transcode(container_job(dir.path(), "job-1"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_recorded_recipes_preserve_order() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder = MockTranscoder::new();

        transcoder
            .transcode(container_job(dir.path(), "job-1"))
            .await
            .unwrap();
        transcoder
            .transcode(TranscodeJob {
                job_id: "job-1".to_string(),
                input: dir.path().join("source"),
                output: PathBuf::from(dir.path().join("out.m4a")),
                recipe: Recipe::AudioExtract { bitrate_kbps: 160 },
            })
            .await
            .unwrap();

        let recipes = transcoder.recorded_recipes().await;
        assert!(matches!(recipes[0], Recipe::Container { .. }));
        assert!(matches!(recipes[1], Recipe::AudioExtract { .. }));
    }
}
