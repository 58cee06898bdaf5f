//! Configuration for the pipeline module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the job pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root directory job workspaces are created under.
    #[serde(default = "default_workspace_root")]
    pub workspace_root: PathBuf,

    /// Whether the adaptive-bitrate ladder target is available.
    /// Submissions requesting `hls` while disabled are rejected.
    #[serde(default)]
    pub enable_hls: bool,

    /// Whether to remove the workspace after a successful publish.
    /// Failed runs always keep their workspace for diagnosis.
    #[serde(default = "default_cleanup")]
    pub cleanup_after_success: bool,

    /// Retry configuration.
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts per job, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt, in seconds.
    #[serde(default = "default_initial_delay")]
    pub initial_delay_secs: u64,

    /// Exponential backoff multiplier.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Upper bound on any single delay, in seconds.
    #[serde(default = "default_max_delay")]
    pub max_delay_secs: u64,
}

fn default_workspace_root() -> PathBuf {
    std::env::temp_dir().join("mediamill")
}

fn default_cleanup() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay() -> u64 {
    1
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_max_delay() -> u64 {
    60
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workspace_root: default_workspace_root(),
            enable_hls: false,
            cleanup_after_success: default_cleanup(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_secs: default_initial_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            max_delay_secs: default_max_delay(),
        }
    }
}

impl RetryConfig {
    /// Delay to sleep after the given failed attempt (1-based):
    /// `initial * multiplier^(attempt-1)`, capped at the maximum.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1);
        let secs =
            self.initial_delay_secs as f64 * self.backoff_multiplier.powi(exp as i32);
        Duration::from_secs_f64(secs.min(self.max_delay_secs as f64))
    }
}

impl PipelineConfig {
    /// Sets the workspace root.
    pub fn with_workspace_root(mut self, root: PathBuf) -> Self {
        self.workspace_root = root;
        self
    }

    /// Enables or disables the adaptive ladder target.
    pub fn with_hls(mut self, enabled: bool) -> Self {
        self.enable_hls = enabled;
        self
    }

    /// Sets the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!(!config.enable_hls);
        assert!(config.cleanup_after_success);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_backoff_grows_exponentially() {
        let retry = RetryConfig {
            max_attempts: 5,
            initial_delay_secs: 1,
            backoff_multiplier: 2.0,
            max_delay_secs: 60,
        };
        assert_eq!(retry.delay_after(1), Duration::from_secs(1));
        assert_eq!(retry.delay_after(2), Duration::from_secs(2));
        assert_eq!(retry.delay_after(3), Duration::from_secs(4));
        assert_eq!(retry.delay_after(4), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_respects_cap() {
        let retry = RetryConfig {
            max_attempts: 10,
            initial_delay_secs: 30,
            backoff_multiplier: 2.0,
            max_delay_secs: 60,
        };
        assert_eq!(retry.delay_after(5), Duration::from_secs(60));
    }

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::default()
            .with_workspace_root(PathBuf::from("/work"))
            .with_hls(true);
        assert_eq!(config.workspace_root, PathBuf::from("/work"));
        assert!(config.enable_hls);
    }
}
