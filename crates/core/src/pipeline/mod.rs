//! Pipeline module: the per-job orchestrator and its retry policy.
//!
//! One [`JobRunner`] executes one job end to end: acquire the source
//! (and subtitles, if requested), produce each requested format in
//! canonical order, publish every artifact as soon as it exists, and
//! report a terminal state. The retry loop is owned here, wrapping the
//! whole attempt: a failed attempt restarts from acquisition with no
//! state carried over.
//!
//! # Example
//!
//! ```ignore
//! use mediamill_core::pipeline::{JobRunner, PipelineConfig};
//! use mediamill_core::fetcher::HttpFetcher;
//! use mediamill_core::transcoder::FfmpegTranscoder;
//! use mediamill_core::publisher::S3Publisher;
//!
//! let runner = JobRunner::new(
//!     PipelineConfig::default(),
//!     Arc::new(HttpFetcher::with_defaults()),
//!     Arc::new(FfmpegTranscoder::with_defaults()),
//!     Arc::new(S3Publisher::new(&config.storage)?),
//! );
//!
//! let result = runner.run(&job).await;
//! println!("{:?}: {:?}", result.state, result.outputs);
//! ```

mod config;
mod error;
mod runner;
mod stages;

pub use config::{PipelineConfig, RetryConfig};
pub use error::PipelineError;
pub use runner::JobRunner;
pub use stages::ProducedOutput;
