//! Per-format production stages.
//!
//! Each function turns the job's source file into one format's
//! artifact(s) by sequencing encoder invocations. Multi-invocation
//! flows live here, above the [`Transcoder`] seam, so their ordering
//! is testable: the GIF palette re-encode must never run when palette
//! generation failed.

use std::path::PathBuf;

use crate::job::{Format, Job};
use crate::metrics;
use crate::packager::{HlsPackage, HlsPackager};
use crate::profiles::{AUDIO_EXTRACT_BITRATE_KBPS, MP4_PROFILE, WEBM_PROFILE};
use crate::transcoder::{Recipe, TranscodeJob, Transcoder};
use crate::workspace::Workspace;

use super::error::PipelineError;

/// What one format production step yielded.
#[derive(Debug, Clone)]
pub enum ProducedOutput {
    /// A single local artifact file, ready to publish.
    File(PathBuf),
    /// A complete adaptive package directory. Not published through
    /// the per-artifact path in the baseline design.
    Package(HlsPackage),
}

fn observe_duration(format: Format, duration_ms: u64) {
    let label = format.to_string();
    metrics::TRANSCODE_DURATION
        .with_label_values(&[label.as_str()])
        .observe(duration_ms as f64 / 1000.0);
}

/// Produces the artifact(s) for one requested format.
pub async fn produce(
    transcoder: &dyn Transcoder,
    job: &Job,
    workspace: &Workspace,
    format: Format,
) -> Result<ProducedOutput, PipelineError> {
    match format {
        Format::Mp4 | Format::Webm => container(transcoder, job, workspace, format).await,
        Format::Gif => gif(transcoder, job, workspace).await,
        Format::Audio => audio(transcoder, job, workspace).await,
        Format::Thumbnail => thumbnail(transcoder, job, workspace).await,
        Format::Hls => hls(transcoder, job, workspace).await,
    }
}

async fn container(
    transcoder: &dyn Transcoder,
    job: &Job,
    workspace: &Workspace,
    format: Format,
) -> Result<ProducedOutput, PipelineError> {
    let profile = match format {
        Format::Webm => WEBM_PROFILE,
        _ => MP4_PROFILE,
    };
    let subs_path = workspace.subtitle_path();
    let burn_subtitles = job
        .subtitle_url
        .as_ref()
        .map(|_| subs_path);

    let output = workspace
        .artifact_path(job, format)
        .expect("container formats have a single artifact");
    let result = transcoder
        .transcode(TranscodeJob {
            job_id: job.id.clone(),
            input: workspace.source_path(),
            output,
            recipe: Recipe::Container {
                profile,
                burn_subtitles,
            },
        })
        .await?;
    observe_duration(format, result.duration_ms);
    Ok(ProducedOutput::File(result.output))
}

/// Two sequential invocations over the same clip window. The second
/// pass consumes the first's palette file and is skipped entirely if
/// palette generation fails.
async fn gif(
    transcoder: &dyn Transcoder,
    job: &Job,
    workspace: &Workspace,
) -> Result<ProducedOutput, PipelineError> {
    let palette = workspace.palette_path();
    let first_pass = transcoder
        .transcode(TranscodeJob {
            job_id: job.id.clone(),
            input: workspace.source_path(),
            output: palette.clone(),
            recipe: Recipe::PaletteGen {
                start: job.gif_start,
                duration: job.gif_duration,
            },
        })
        .await?;
    observe_duration(Format::Gif, first_pass.duration_ms);

    let output = workspace
        .artifact_path(job, Format::Gif)
        .expect("gif has a single artifact");
    let result = transcoder
        .transcode(TranscodeJob {
            job_id: job.id.clone(),
            input: workspace.source_path(),
            output,
            recipe: Recipe::PaletteUse {
                palette,
                start: job.gif_start,
                duration: job.gif_duration,
            },
        })
        .await?;
    observe_duration(Format::Gif, result.duration_ms);
    Ok(ProducedOutput::File(result.output))
}

async fn audio(
    transcoder: &dyn Transcoder,
    job: &Job,
    workspace: &Workspace,
) -> Result<ProducedOutput, PipelineError> {
    let output = workspace
        .artifact_path(job, Format::Audio)
        .expect("audio has a single artifact");
    let result = transcoder
        .transcode(TranscodeJob {
            job_id: job.id.clone(),
            input: workspace.source_path(),
            output,
            recipe: Recipe::AudioExtract {
                bitrate_kbps: AUDIO_EXTRACT_BITRATE_KBPS,
            },
        })
        .await?;
    observe_duration(Format::Audio, result.duration_ms);
    Ok(ProducedOutput::File(result.output))
}

async fn thumbnail(
    transcoder: &dyn Transcoder,
    job: &Job,
    workspace: &Workspace,
) -> Result<ProducedOutput, PipelineError> {
    let output = workspace
        .artifact_path(job, Format::Thumbnail)
        .expect("thumbnail has a single artifact");
    let result = transcoder
        .transcode(TranscodeJob {
            job_id: job.id.clone(),
            input: workspace.source_path(),
            output,
            recipe: Recipe::Thumbnail {
                at: job.thumbnail_time,
            },
        })
        .await?;
    observe_duration(Format::Thumbnail, result.duration_ms);
    Ok(ProducedOutput::File(result.output))
}

async fn hls(
    transcoder: &dyn Transcoder,
    job: &Job,
    workspace: &Workspace,
) -> Result<ProducedOutput, PipelineError> {
    let packager = HlsPackager::new();
    let package = packager
        .package(
            transcoder,
            &job.id,
            &workspace.source_path(),
            &workspace.hls_dir(),
        )
        .await?;
    Ok(ProducedOutput::Package(package))
}
