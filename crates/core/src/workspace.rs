//! Job-scoped workspace directories.
//!
//! Every pipeline run gets its own directory under the configured
//! root, keyed by the job identifier rather than the (user-controlled)
//! title. Two concurrent jobs with the same title therefore never
//! share a directory. The workspace holds the downloaded source, the
//! optional subtitle file, and every artifact before it is published.

use std::path::{Path, PathBuf};

use crate::job::{Format, Job};

/// Filesystem layout for one job's pipeline run.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Creates the workspace directory for a job, including parents.
    pub async fn create(workspace_root: &Path, job_id: &str) -> std::io::Result<Workspace> {
        let root = workspace_root.join(job_id);
        tokio::fs::create_dir_all(&root).await?;
        Ok(Workspace { root })
    }

    /// The workspace directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the downloaded source file lives.
    pub fn source_path(&self) -> PathBuf {
        self.root.join("source")
    }

    /// Where the downloaded subtitle file lives, when requested.
    pub fn subtitle_path(&self) -> PathBuf {
        self.root.join("subs.srt")
    }

    /// Local path of a single-file artifact for the given format.
    ///
    /// Returns `None` for HLS, which packages into [`Self::hls_dir`].
    pub fn artifact_path(&self, job: &Job, format: Format) -> Option<PathBuf> {
        format
            .artifact_filename(&job.safe_title)
            .map(|name| self.root.join(name))
    }

    /// Intermediate palette file for the two-pass GIF encode.
    pub fn palette_path(&self) -> PathBuf {
        self.root.join("palette.png")
    }

    /// Directory the adaptive-bitrate package is written into.
    pub fn hls_dir(&self) -> PathBuf {
        self.root.join("hls")
    }

    /// Removes the workspace. Called only after a successful publish;
    /// failed runs keep their files for diagnosis.
    pub async fn cleanup(&self) -> std::io::Result<()> {
        tokio::fs::remove_dir_all(&self.root).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{JobRequest, Job};

    fn job(title: &str) -> Job {
        Job::from_request(
            JobRequest {
                source_url: "http://example.com/in.mkv".to_string(),
                title: title.to_string(),
                targets: vec![Format::Mp4],
                subtitle_url: None,
                thumbnail_time: 2.0,
                gif_start: 0.0,
                gif_duration: 3.0,
            },
            false,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_workspace_keyed_by_job_id() {
        let tmp = tempfile::tempdir().unwrap();
        let a = job("Same Title");
        let b = job("Same Title");

        let ws_a = Workspace::create(tmp.path(), &a.id).await.unwrap();
        let ws_b = Workspace::create(tmp.path(), &b.id).await.unwrap();

        assert_ne!(ws_a.root(), ws_b.root());
        assert!(ws_a.root().ends_with(&a.id));
    }

    #[tokio::test]
    async fn test_workspace_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let j = job("My Movie");
        let ws = Workspace::create(tmp.path(), &j.id).await.unwrap();

        assert_eq!(ws.source_path(), ws.root().join("source"));
        assert_eq!(ws.subtitle_path(), ws.root().join("subs.srt"));
        assert_eq!(
            ws.artifact_path(&j, Format::Mp4).unwrap(),
            ws.root().join("My_Movie.mp4")
        );
        assert!(ws.artifact_path(&j, Format::Hls).is_none());
        assert_eq!(ws.hls_dir(), ws.root().join("hls"));
    }

    #[tokio::test]
    async fn test_cleanup_removes_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let j = job("t");
        let ws = Workspace::create(tmp.path(), &j.id).await.unwrap();
        tokio::fs::write(ws.source_path(), b"data").await.unwrap();

        ws.cleanup().await.unwrap();
        assert!(!ws.root().exists());
    }
}
