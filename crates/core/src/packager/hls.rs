//! HLS ladder packaging.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::profiles::{LadderRendition, HLS_LADDER, HLS_SEGMENT_SECS};
use crate::transcoder::{Recipe, TranscodeJob, Transcoder};

use super::error::PackagingError;

/// A completed adaptive-bitrate package.
#[derive(Debug, Clone)]
pub struct HlsPackage {
    /// Directory holding segments, per-rendition playlists and the
    /// master manifest.
    pub dir: PathBuf,
    /// Path of the master manifest.
    pub master_playlist: PathBuf,
    /// Renditions included, low to high.
    pub renditions: Vec<LadderRendition>,
}

/// Renders the master playlist for a set of renditions.
///
/// One `#EXTM3U` document header, then one STREAM-INF/URI pair per
/// rendition carrying the approximate bandwidth and pixel resolution.
pub fn render_master_playlist(renditions: &[LadderRendition]) -> String {
    let mut out = String::from("#EXTM3U\n");
    for r in renditions {
        out.push_str(&format!(
            "#EXT-X-STREAM-INF:BANDWIDTH={},RESOLUTION={}x{}\n{}\n",
            r.approx_bandwidth(),
            r.width,
            r.height,
            r.playlist_name()
        ));
    }
    out
}

/// Builds the full adaptive package for one source file.
pub struct HlsPackager {
    ladder: Vec<LadderRendition>,
    segment_secs: u32,
}

impl Default for HlsPackager {
    fn default() -> Self {
        Self::new()
    }
}

impl HlsPackager {
    /// Creates a packager over the fixed ladder.
    pub fn new() -> Self {
        Self {
            ladder: HLS_LADDER.to_vec(),
            segment_secs: HLS_SEGMENT_SECS,
        }
    }

    /// Creates a packager with a custom ladder (tests).
    pub fn with_ladder(ladder: Vec<LadderRendition>, segment_secs: u32) -> Self {
        Self {
            ladder,
            segment_secs,
        }
    }

    /// Encodes every rendition into `out_dir` and writes the master
    /// manifest. If any rendition fails, returns the error without
    /// writing a manifest.
    pub async fn package(
        &self,
        transcoder: &dyn Transcoder,
        job_id: &str,
        source: &Path,
        out_dir: &Path,
    ) -> Result<HlsPackage, PackagingError> {
        tokio::fs::create_dir_all(out_dir).await.map_err(|source| {
            PackagingError::DirectoryCreationFailed {
                path: out_dir.to_path_buf(),
                source,
            }
        })?;

        for rendition in &self.ladder {
            let job = TranscodeJob {
                job_id: job_id.to_string(),
                input: source.to_path_buf(),
                output: out_dir.join(rendition.playlist_name()),
                recipe: Recipe::HlsRendition {
                    rendition: *rendition,
                    segment_pattern: out_dir.join(rendition.segment_pattern()),
                    segment_secs: self.segment_secs,
                },
            };
            transcoder.transcode(job).await.map_err(|source| {
                PackagingError::RenditionFailed {
                    height: rendition.height,
                    source,
                }
            })?;
        }

        let master_playlist = out_dir.join("master.m3u8");
        let manifest = render_master_playlist(&self.ladder);
        tokio::fs::write(&master_playlist, manifest)
            .await
            .map_err(|source| PackagingError::ManifestWriteFailed {
                path: master_playlist.clone(),
                source,
            })?;

        info!(job_id, "HLS packaged at {}", out_dir.display());
        Ok(HlsPackage {
            dir: out_dir.to_path_buf(),
            master_playlist,
            renditions: self.ladder.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::HLS_LADDER;

    #[test]
    fn test_master_playlist_single_header() {
        let manifest = render_master_playlist(&HLS_LADDER);
        assert_eq!(manifest.matches("#EXTM3U").count(), 1);
        assert!(manifest.starts_with("#EXTM3U\n"));
    }

    #[test]
    fn test_master_playlist_pair_per_rendition() {
        let manifest = render_master_playlist(&HLS_LADDER);
        assert_eq!(manifest.matches("#EXT-X-STREAM-INF").count(), HLS_LADDER.len());
        for r in &HLS_LADDER {
            assert!(manifest.contains(&r.playlist_name()));
            assert!(manifest.contains(&format!("RESOLUTION={}x{}", r.width, r.height)));
        }
    }

    #[test]
    fn test_master_playlist_real_bandwidth() {
        let manifest = render_master_playlist(&HLS_LADDER);
        // No placeholder bandwidth values.
        assert!(!manifest.contains("BANDWIDTH=0,"));
        assert!(manifest.contains("BANDWIDTH=545600,RESOLUTION=426x240"));
        assert!(manifest.contains("BANDWIDTH=3220800,RESOLUTION=1280x720"));
    }

    #[test]
    fn test_master_playlist_layout() {
        let manifest = render_master_playlist(&HLS_LADDER[..1]);
        let lines: Vec<&str> = manifest.lines().collect();
        assert_eq!(
            lines,
            vec![
                "#EXTM3U",
                "#EXT-X-STREAM-INF:BANDWIDTH=545600,RESOLUTION=426x240",
                "240p.m3u8",
            ]
        );
    }
}
