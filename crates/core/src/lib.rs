pub mod config;
pub mod fetcher;
pub mod job;
pub mod metrics;
pub mod packager;
pub mod pipeline;
pub mod profiles;
pub mod publisher;
pub mod status;
pub mod testing;
pub mod transcoder;
pub mod workspace;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    StorageConfig,
};
pub use fetcher::{FetchError, Fetcher, FetcherConfig, HttpFetcher};
pub use job::{Format, Job, JobError, JobRequest, JobResult, JobState};
pub use pipeline::{JobRunner, PipelineConfig, PipelineError, RetryConfig};
pub use publisher::{PublishError, PublishedArtifact, Publisher, S3Publisher};
pub use status::{status_channel, StatusHandle, StatusUpdate};
pub use transcoder::{FfmpegTranscoder, TranscodeError, Transcoder, TranscoderConfig};
