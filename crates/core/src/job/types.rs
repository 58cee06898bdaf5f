//! Job types: requests, validated jobs and terminal results.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::title::safe_title;

/// Output formats the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Mp4,
    Webm,
    Gif,
    Audio,
    Thumbnail,
    Hls,
}

impl Format {
    /// Canonical execution order. Within one job, formats run and
    /// publish in this order regardless of submission order.
    pub const ALL: [Format; 6] = [
        Format::Mp4,
        Format::Webm,
        Format::Gif,
        Format::Audio,
        Format::Thumbnail,
        Format::Hls,
    ];

    /// Filename of this format's artifact for a sanitized title.
    ///
    /// HLS produces a directory of segments and playlists rather than
    /// a single file, so it has no single artifact name.
    pub fn artifact_filename(&self, safe: &str) -> Option<String> {
        match self {
            Format::Mp4 => Some(format!("{}.mp4", safe)),
            Format::Webm => Some(format!("{}.webm", safe)),
            Format::Gif => Some(format!("{}.gif", safe)),
            Format::Audio => Some(format!("{}.m4a", safe)),
            Format::Thumbnail => Some(format!("{}_thumb.jpg", safe)),
            Format::Hls => None,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Format::Mp4 => "mp4",
            Format::Webm => "webm",
            Format::Gif => "gif",
            Format::Audio => "audio",
            Format::Thumbnail => "thumbnail",
            Format::Hls => "hls",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised when a submission fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobError {
    /// The target list is empty.
    #[error("No target formats requested")]
    EmptyTargets,

    /// The same format appears twice in the target list.
    #[error("Duplicate target format: {0}")]
    DuplicateTarget(Format),

    /// The format is disabled by configuration.
    #[error("Target format is disabled: {0}")]
    TargetDisabled(Format),
}

/// A conversion request as received from the intake surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// URL of the source media file.
    pub source_url: String,

    /// Display title; sanitized for storage keys and artifact names.
    #[serde(default = "default_title")]
    pub title: String,

    /// Requested output formats. Duplicates are a submission error.
    pub targets: Vec<Format>,

    /// Optional subtitle track to burn into container transcodes.
    #[serde(default)]
    pub subtitle_url: Option<String>,

    /// Timestamp of the thumbnail still, in seconds.
    #[serde(default = "default_thumbnail_time")]
    pub thumbnail_time: f64,

    /// Start offset of the animated clip, in seconds.
    #[serde(default)]
    pub gif_start: f64,

    /// Duration of the animated clip, in seconds.
    #[serde(default = "default_gif_duration")]
    pub gif_duration: f64,
}

fn default_title() -> String {
    "untitled".to_string()
}

fn default_thumbnail_time() -> f64 {
    2.0
}

fn default_gif_duration() -> f64 {
    3.0
}

/// A validated, immutable job.
///
/// Constructed only through [`Job::from_request`], so a `Job` in hand
/// is known to have a duplicate-free, enabled target set.
#[derive(Debug, Clone)]
pub struct Job {
    /// Unique job identifier; also keys the workspace directory.
    pub id: String,
    /// Source media URL.
    pub source_url: String,
    /// Original display title.
    pub title: String,
    /// Sanitized title used for artifact names and storage keys.
    pub safe_title: String,
    /// Requested formats in canonical execution order.
    pub targets: Vec<Format>,
    /// Optional subtitle URL.
    pub subtitle_url: Option<String>,
    /// Thumbnail timestamp in seconds.
    pub thumbnail_time: f64,
    /// Animated clip start offset in seconds.
    pub gif_start: f64,
    /// Animated clip duration in seconds.
    pub gif_duration: f64,
}

impl Job {
    /// Validates a request and produces an immutable job.
    ///
    /// Rejects empty target lists, duplicate targets, and the HLS
    /// target when the adaptive ladder is disabled by configuration.
    /// Targets are reordered into canonical execution order.
    pub fn from_request(request: JobRequest, hls_enabled: bool) -> Result<Job, JobError> {
        if request.targets.is_empty() {
            return Err(JobError::EmptyTargets);
        }

        let mut seen = std::collections::HashSet::new();
        for target in &request.targets {
            if !seen.insert(*target) {
                return Err(JobError::DuplicateTarget(*target));
            }
        }

        if !hls_enabled && request.targets.contains(&Format::Hls) {
            return Err(JobError::TargetDisabled(Format::Hls));
        }

        let targets = Format::ALL
            .iter()
            .copied()
            .filter(|f| request.targets.contains(f))
            .collect();

        Ok(Job {
            id: Uuid::new_v4().to_string(),
            safe_title: safe_title(&request.title),
            source_url: request.source_url,
            title: request.title,
            targets,
            subtitle_url: request.subtitle_url,
            thumbnail_time: request.thumbnail_time,
            gif_start: request.gif_start,
            gif_duration: request.gif_duration,
        })
    }
}

/// Job lifecycle states reported to the status collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Started,
    Success,
    Failure,
}

/// Terminal outcome of one job, produced once per pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    /// Job identifier.
    pub job_id: String,
    /// Terminal state: `Success` or `Failure`.
    pub state: JobState,
    /// Published artifact names, in execution order. Empty on failure.
    pub outputs: Vec<String>,
    /// Error detail, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Number of attempts the pipeline used.
    pub attempts: u32,
}
