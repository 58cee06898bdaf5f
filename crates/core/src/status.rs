//! Job status reporting.
//!
//! The pipeline emits a [`StatusUpdate`] on every lifecycle transition
//! through a bounded channel; the consumer (the worker binary, or a
//! broker integration) drains the receiver. Emission is best-effort:
//! a slow consumer never blocks or fails the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use crate::job::JobState;

/// One job lifecycle transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Job identifier.
    pub job_id: String,
    /// New state.
    pub state: JobState,
    /// Published artifact names; empty until success.
    pub outputs: Vec<String>,
    /// Error detail, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the transition happened.
    pub timestamp: DateTime<Utc>,
}

impl StatusUpdate {
    /// A transition with no outputs and no error.
    pub fn transition(job_id: &str, state: JobState) -> Self {
        Self {
            job_id: job_id.to_string(),
            state,
            outputs: Vec::new(),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// A terminal success with the published artifact names.
    pub fn success(job_id: &str, outputs: Vec<String>) -> Self {
        Self {
            job_id: job_id.to_string(),
            state: JobState::Success,
            outputs,
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// A terminal failure with the recorded error.
    pub fn failure(job_id: &str, error: String) -> Self {
        Self {
            job_id: job_id.to_string(),
            state: JobState::Failure,
            outputs: Vec::new(),
            error: Some(error),
            timestamp: Utc::now(),
        }
    }
}

/// Cloneable sender half used by the pipeline.
#[derive(Debug, Clone)]
pub struct StatusHandle {
    tx: mpsc::Sender<StatusUpdate>,
}

/// Creates a status channel with the given buffer size.
pub fn status_channel(buffer: usize) -> (StatusHandle, mpsc::Receiver<StatusUpdate>) {
    let (tx, rx) = mpsc::channel(buffer);
    (StatusHandle { tx }, rx)
}

impl StatusHandle {
    /// Emits an update; drops it with a warning if the consumer is
    /// gone or the buffer is full.
    pub fn emit(&self, update: StatusUpdate) {
        if let Err(e) = self.tx.try_send(update) {
            warn!("Dropping status update: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_status_channel_delivers_updates() {
        let (handle, mut rx) = status_channel(8);
        handle.emit(StatusUpdate::transition("job-1", JobState::Started));
        handle.emit(StatusUpdate::success("job-1", vec!["a.mp4".to_string()]));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.state, JobState::Started);
        let second = rx.recv().await.unwrap();
        assert_eq!(second.state, JobState::Success);
        assert_eq!(second.outputs, vec!["a.mp4"]);
    }

    #[tokio::test]
    async fn test_emit_does_not_block_when_full() {
        let (handle, _rx) = status_channel(1);
        handle.emit(StatusUpdate::transition("job-1", JobState::Started));
        // Buffer is full; this must drop, not block.
        handle.emit(StatusUpdate::transition("job-1", JobState::Success));
    }

    #[test]
    fn test_status_serialization() {
        let update = StatusUpdate::failure("job-1", "boom".to_string());
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"failure\""));
        assert!(json.contains("\"boom\""));

        let ok = StatusUpdate::transition("job-1", JobState::Queued);
        let json = serde_json::to_string(&ok).unwrap();
        assert!(json.contains("\"queued\""));
        assert!(!json.contains("error"));
    }
}
