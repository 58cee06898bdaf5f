//! Job runner: orchestration plus the retry loop.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::fetcher::Fetcher;
use crate::job::{build_output_key, Job, JobResult, JobState};
use crate::metrics;
use crate::publisher::Publisher;
use crate::status::{StatusHandle, StatusUpdate};
use crate::transcoder::Transcoder;
use crate::workspace::Workspace;

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::stages::{produce, ProducedOutput};

/// Executes jobs end to end.
///
/// One runner is safe to share across worker tasks: all per-job state
/// lives in the job's own workspace, keyed by job id.
pub struct JobRunner {
    config: PipelineConfig,
    fetcher: Arc<dyn Fetcher>,
    transcoder: Arc<dyn Transcoder>,
    publisher: Arc<dyn Publisher>,
    status: Option<StatusHandle>,
}

impl JobRunner {
    /// Creates a new runner.
    pub fn new(
        config: PipelineConfig,
        fetcher: Arc<dyn Fetcher>,
        transcoder: Arc<dyn Transcoder>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            config,
            fetcher,
            transcoder,
            publisher,
            status: None,
        }
    }

    /// Attaches a status handle for lifecycle reporting.
    pub fn with_status(mut self, status: StatusHandle) -> Self {
        self.status = Some(status);
        self
    }

    fn emit(&self, update: StatusUpdate) {
        if let Some(status) = &self.status {
            status.emit(update);
        }
    }

    /// Runs a job to its terminal state.
    ///
    /// The whole attempt is retried on any failure, up to the
    /// configured bound with exponential backoff; no state survives
    /// between attempts. The returned [`JobResult`] is `Success` with
    /// the ordered published names, or `Failure` carrying the last
    /// error verbatim.
    pub async fn run(&self, job: &Job) -> JobResult {
        self.emit(StatusUpdate::transition(&job.id, JobState::Started));
        info!(job_id = %job.id, title = %job.title, targets = ?job.targets, "Job started");

        let max_attempts = self.config.retry.max_attempts;
        let mut last_error: Option<PipelineError> = None;

        for attempt in 1..=max_attempts {
            let started = Instant::now();
            match self.attempt(job).await {
                Ok(outputs) => {
                    metrics::PIPELINE_ATTEMPTS.with_label_values(&["success"]).inc();
                    metrics::ATTEMPT_DURATION
                        .with_label_values(&["success"])
                        .observe(started.elapsed().as_secs_f64());
                    metrics::JOBS_COMPLETED.with_label_values(&["success"]).inc();

                    info!(job_id = %job.id, attempt, "Job succeeded: {:?}", outputs);
                    self.emit(StatusUpdate::success(&job.id, outputs.clone()));
                    return JobResult {
                        job_id: job.id.clone(),
                        state: JobState::Success,
                        outputs,
                        error: None,
                        attempts: attempt,
                    };
                }
                Err(e) => {
                    metrics::PIPELINE_ATTEMPTS.with_label_values(&["failed"]).inc();
                    metrics::ATTEMPT_DURATION
                        .with_label_values(&["failed"])
                        .observe(started.elapsed().as_secs_f64());

                    warn!(job_id = %job.id, attempt, max_attempts, "Attempt failed: {}", e);
                    if attempt < max_attempts {
                        let delay = self.config.retry.delay_after(attempt);
                        metrics::RETRY_ATTEMPTS.inc();
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        metrics::JOBS_COMPLETED.with_label_values(&["failure"]).inc();
        error!(job_id = %job.id, "Job failed after {} attempts: {}", max_attempts, detail);
        self.emit(StatusUpdate::failure(&job.id, detail.clone()));

        JobResult {
            job_id: job.id.clone(),
            state: JobState::Failure,
            outputs: Vec::new(),
            error: Some(detail),
            attempts: max_attempts,
        }
    }

    /// One full pipeline attempt: acquire, produce, publish.
    ///
    /// Partial artifacts of a failed attempt stay in the workspace for
    /// diagnosis; a successful attempt cleans up when configured.
    async fn attempt(&self, job: &Job) -> Result<Vec<String>, PipelineError> {
        let workspace = Workspace::create(&self.config.workspace_root, &job.id).await?;

        self.fetcher
            .fetch(&job.source_url, &workspace.source_path())
            .await?;
        if let Some(subtitle_url) = &job.subtitle_url {
            self.fetcher
                .fetch(subtitle_url, &workspace.subtitle_path())
                .await?;
        }

        let mut outputs = Vec::new();
        let mut produced_package = false;
        for format in &job.targets {
            let produced = produce(self.transcoder.as_ref(), job, &workspace, *format).await;
            let format_label = format.to_string();
            let result_label = if produced.is_ok() { "success" } else { "failed" };
            metrics::TRANSCODES_TOTAL
                .with_label_values(&[format_label.as_str(), result_label])
                .inc();

            match produced? {
                ProducedOutput::File(path) => {
                    let filename = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    let key = build_output_key(&job.safe_title, &filename);
                    let published = self.publisher.publish(&path, &key).await?;
                    metrics::ARTIFACTS_PUBLISHED.inc();
                    outputs.push(published.name);
                }
                ProducedOutput::Package(package) => {
                    // Segments and manifests stay in the workspace; the
                    // storage collaborator syncs the directory wholesale.
                    produced_package = true;
                    info!(
                        job_id = %job.id,
                        "Adaptive package ready at {} ({} renditions)",
                        package.dir.display(),
                        package.renditions.len()
                    );
                }
            }
        }

        // A produced package lives only in the workspace until the
        // directory sync picks it up, so the workspace must survive.
        if produced_package {
            info!(job_id = %job.id, "Keeping workspace for package sync");
        } else if self.config.cleanup_after_success {
            if let Err(e) = workspace.cleanup().await {
                warn!(job_id = %job.id, "Workspace cleanup failed: {}", e);
            }
        }

        Ok(outputs)
    }
}
