//! Configuration for the fetcher module.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Upper bound for one transfer, in seconds. Covers connect plus
    /// the whole body so a stalled remote cannot pin a worker.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    300
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}
