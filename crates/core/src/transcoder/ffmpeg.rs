//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::TranscoderConfig;
use super::error::TranscodeError;
use super::traits::Transcoder;
use super::types::{Recipe, TranscodeJob, TranscodeResult};

/// How many trailing stderr lines are kept for error reporting.
const STDERR_TAIL_LINES: usize = 20;

/// FFmpeg-based transcoder implementation.
pub struct FfmpegTranscoder {
    config: TranscoderConfig,
}

impl FfmpegTranscoder {
    /// Creates a new FFmpeg transcoder with the given configuration.
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TranscoderConfig::default())
    }

    /// Builds the full ffmpeg argument vector for a job.
    ///
    /// Pure; the output of this function is the entire contract with
    /// the external tool apart from its exit status.
    fn build_args(&self, job: &TranscodeJob) -> Vec<String> {
        let mut args = vec!["-y".to_string()];
        let input = job.input.to_string_lossy().to_string();

        match &job.recipe {
            Recipe::Container {
                profile,
                burn_subtitles,
            } => {
                args.extend(["-i".to_string(), input]);
                args.extend(["-c:v".to_string(), profile.video_codec.to_string()]);
                if let Some(preset) = profile.preset {
                    args.extend(["-preset".to_string(), preset.to_string()]);
                }
                if let Some(bitrate) = profile.video_bitrate {
                    args.extend(["-b:v".to_string(), bitrate.to_string()]);
                }
                args.extend(["-crf".to_string(), profile.crf.to_string()]);
                if let Some(cpu_used) = profile.cpu_used {
                    args.extend(["-cpu-used".to_string(), cpu_used.to_string()]);
                }
                args.extend(["-c:a".to_string(), profile.audio_codec.to_string()]);
                args.extend([
                    "-b:a".to_string(),
                    format!("{}k", profile.audio_bitrate_kbps),
                ]);
                // Burn-in is the only video filter in this recipe.
                if let Some(subs) = burn_subtitles {
                    args.extend([
                        "-vf".to_string(),
                        format!("subtitles={}", subs.to_string_lossy()),
                    ]);
                }
            }
            Recipe::PaletteGen { start, duration } => {
                args.extend(["-ss".to_string(), start.to_string()]);
                args.extend(["-t".to_string(), duration.to_string()]);
                args.extend(["-i".to_string(), input]);
                args.extend(["-vf".to_string(), "palettegen".to_string()]);
            }
            Recipe::PaletteUse {
                palette,
                start,
                duration,
            } => {
                args.extend(["-ss".to_string(), start.to_string()]);
                args.extend(["-t".to_string(), duration.to_string()]);
                args.extend(["-i".to_string(), input]);
                args.extend(["-i".to_string(), palette.to_string_lossy().to_string()]);
                args.extend(["-lavfi".to_string(), "paletteuse".to_string()]);
            }
            Recipe::AudioExtract { bitrate_kbps } => {
                args.extend(["-i".to_string(), input]);
                args.push("-vn".to_string());
                args.extend(["-c:a".to_string(), "aac".to_string()]);
                args.extend(["-b:a".to_string(), format!("{}k", bitrate_kbps)]);
            }
            Recipe::Thumbnail { at } => {
                args.extend(["-ss".to_string(), at.to_string()]);
                args.extend(["-i".to_string(), input]);
                args.extend(["-vframes".to_string(), "1".to_string()]);
            }
            Recipe::HlsRendition {
                rendition,
                segment_pattern,
                segment_secs,
            } => {
                args.extend(["-i".to_string(), input]);
                // Scale to fit, preserving aspect ratio, never upscaling.
                args.extend([
                    "-vf".to_string(),
                    format!(
                        "scale=w={}:h={}:force_original_aspect_ratio=decrease",
                        rendition.width, rendition.height
                    ),
                ]);
                args.extend(["-c:v".to_string(), "libx264".to_string()]);
                args.extend(["-profile:v".to_string(), "main".to_string()]);
                args.extend(["-crf".to_string(), "22".to_string()]);
                args.extend([
                    "-b:v".to_string(),
                    format!("{}k", rendition.video_bitrate_kbps),
                ]);
                args.extend(["-c:a".to_string(), "aac".to_string()]);
                args.extend([
                    "-b:a".to_string(),
                    format!("{}k", rendition.audio_bitrate_kbps),
                ]);
                args.extend(["-hls_time".to_string(), segment_secs.to_string()]);
                args.extend(["-hls_playlist_type".to_string(), "vod".to_string()]);
                args.extend([
                    "-hls_segment_filename".to_string(),
                    segment_pattern.to_string_lossy().to_string(),
                ]);
            }
        }

        args.extend(["-loglevel".to_string(), self.config.log_level.clone()]);
        args.extend(self.config.extra_args.iter().cloned());
        args.push(job.output.to_string_lossy().to_string());
        args
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscodeError> {
        if !job.input.exists() {
            return Err(TranscodeError::InputNotFound {
                path: job.input.clone(),
            });
        }

        let start = Instant::now();
        let args = self.build_args(&job);
        debug!(job_id = %job.job_id, "ffmpeg {}", args.join(" "));

        let mut child = Command::new(&self.config.ffmpeg_path)
            .arg("-nostdin")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscodeError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    TranscodeError::Io(e)
                }
            })?;

        let stderr = child.stderr.take().expect("stderr should be captured");
        let mut reader = BufReader::new(stderr).lines();

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let result = timeout(timeout_duration, async {
            // Keep a tail of stderr for error detail; success is judged
            // by exit status alone.
            let mut tail: Vec<String> = Vec::new();
            while let Ok(Some(line)) = reader.next_line().await {
                if tail.len() >= STDERR_TAIL_LINES {
                    tail.remove(0);
                }
                tail.push(line);
            }
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, tail))
        })
        .await;

        match result {
            Ok(Ok((status, tail))) => {
                if !status.success() {
                    let stderr_tail = if tail.is_empty() {
                        None
                    } else {
                        Some(tail.join("\n"))
                    };
                    return Err(TranscodeError::failed(
                        format!("FFmpeg exited with code: {:?}", status.code()),
                        stderr_tail,
                    ));
                }
            }
            Ok(Err(e)) => return Err(TranscodeError::Io(e)),
            Err(_) => {
                let _ = child.kill().await;
                return Err(TranscodeError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        }

        let output_size_bytes = tokio::fs::metadata(&job.output)
            .await
            .map(|m| m.len())
            .map_err(|_| TranscodeError::failed("Output file not created", None))?;

        Ok(TranscodeResult {
            output: job.output,
            output_size_bytes,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), TranscodeError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TranscodeError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                })
            }
            Err(e) => Err(TranscodeError::Io(e)),
        }
    }
}
