//! Types for the transcoder module.

use std::path::PathBuf;

use crate::profiles::{EncodingProfile, LadderRendition};

/// One external encoder invocation.
///
/// Each variant maps to exactly one process run producing exactly one
/// output file (for `HlsRendition`, one per-rendition playlist plus
/// its segments).
#[derive(Debug, Clone, PartialEq)]
pub enum Recipe {
    /// Full container transcode with a static profile. When a subtitle
    /// file is given, a burn-in filter renders the text into the video
    /// frames; in the current design this is mutually exclusive with
    /// any other video filter.
    Container {
        profile: EncodingProfile,
        burn_subtitles: Option<PathBuf>,
    },

    /// First GIF pass: generate a reduced color palette over the clip
    /// window.
    PaletteGen { start: f64, duration: f64 },

    /// Second GIF pass: re-encode the same window using the palette
    /// produced by [`Recipe::PaletteGen`] as a second input.
    PaletteUse {
        palette: PathBuf,
        start: f64,
        duration: f64,
    },

    /// Strip video, re-encode audio at a fixed bitrate.
    AudioExtract { bitrate_kbps: u32 },

    /// Seek and extract a single frame as a still image.
    Thumbnail { at: f64 },

    /// Encode one ladder rung, scaled to fit without upscaling, and
    /// segment it into fixed-duration chunks.
    HlsRendition {
        rendition: LadderRendition,
        segment_pattern: PathBuf,
        segment_secs: u32,
    },
}

/// A single transcode invocation request.
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    /// Job this invocation belongs to, for logging.
    pub job_id: String,
    /// Source media file.
    pub input: PathBuf,
    /// Output file this invocation must produce.
    pub output: PathBuf,
    /// What to do.
    pub recipe: Recipe,
}

/// Result of a successful transcode invocation.
#[derive(Debug, Clone)]
pub struct TranscodeResult {
    /// Path of the produced output file.
    pub output: PathBuf,
    /// Output size in bytes, when the implementation knows it.
    pub output_size_bytes: u64,
    /// Wall-clock duration of the invocation in milliseconds.
    pub duration_ms: u64,
}
