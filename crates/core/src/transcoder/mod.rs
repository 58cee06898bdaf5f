//! Transcoder module wrapping the external encoder.
//!
//! A [`Recipe`] describes exactly one external encoder invocation; the
//! [`Transcoder`] trait executes it and reports success solely from
//! the process exit status. Multi-invocation flows (the two-pass GIF
//! encode, the adaptive ladder) are sequenced by their callers, which
//! keeps each invocation independently mockable in tests.

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::TranscoderConfig;
pub use error::TranscodeError;
pub use ffmpeg::FfmpegTranscoder;
pub use traits::Transcoder;
pub use types::{Recipe, TranscodeJob, TranscodeResult};
