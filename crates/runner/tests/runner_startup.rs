//! Binary startup and input validation tests.
//!
//! These spawn the `mediamill` binary and exercise the failure paths
//! that resolve before any network or encoder work: missing config,
//! unparseable job files, and submissions rejected at validation.

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

/// Create a minimal valid config
fn minimal_config(workspace_root: &std::path::Path) -> String {
    format!(
        r#"
[storage]
bucket = "media"
access_key = "test"
secret_key = "test"

[pipeline]
workspace_root = "{}"
"#,
        workspace_root.display()
    )
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Run the binary with a config and job file, returning its output
async fn run_binary(
    config_path: Option<&std::path::Path>,
    job_path: &std::path::Path,
) -> std::process::Output {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_mediamill"));
    if let Some(config) = config_path {
        command.env("MEDIAMILL_CONFIG", config);
    } else {
        command.env("MEDIAMILL_CONFIG", "/nonexistent/config.toml");
    }
    command
        .arg(job_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .output()
        .await
        .expect("Failed to run binary")
}

#[tokio::test]
async fn test_missing_config_is_fatal() {
    let job = write_temp(r#"{"source_url": "http://x/y", "targets": ["mp4"]}"#);
    let output = run_binary(None, job.path()).await;
    assert_eq!(output.status.code(), Some(2));
}

#[tokio::test]
async fn test_unparseable_job_file_is_fatal() {
    let workspace = TempDir::new().unwrap();
    let config = write_temp(&minimal_config(workspace.path()));
    let job = write_temp("not json");

    let output = run_binary(Some(config.path()), job.path()).await;
    assert_eq!(output.status.code(), Some(2));
}

#[tokio::test]
async fn test_duplicate_targets_rejected_at_submission() {
    let workspace = TempDir::new().unwrap();
    let config = write_temp(&minimal_config(workspace.path()));
    let job = write_temp(r#"{"source_url": "http://x/y", "targets": ["mp4", "mp4"]}"#);

    let output = run_binary(Some(config.path()), job.path()).await;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Job request rejected"), "got: {}", stderr);
}

#[tokio::test]
async fn test_hls_rejected_when_disabled() {
    let workspace = TempDir::new().unwrap();
    // enable_hls defaults to false
    let config = write_temp(&minimal_config(workspace.path()));
    let job = write_temp(r#"{"source_url": "http://x/y", "targets": ["hls"]}"#);

    let output = run_binary(Some(config.path()), job.path()).await;
    assert_eq!(output.status.code(), Some(2));
}
