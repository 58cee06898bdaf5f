//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of the pipeline's
//! collaborator traits, allowing full pipeline runs without a network,
//! an encoder binary, or real object storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediamill_core::testing::{MockFetcher, MockPublisher, MockTranscoder};
//!
//! let fetcher = MockFetcher::new();
//! let transcoder = MockTranscoder::new();
//! let publisher = MockPublisher::new();
//!
//! // Configure mock behavior
//! fetcher.set_content("http://host/a.mkv", b"media".to_vec()).await;
//! transcoder.fail_next(1).await;
//!
//! // Use in a JobRunner...
//! ```

mod mock_fetcher;
mod mock_publisher;
mod mock_transcoder;

pub use mock_fetcher::MockFetcher;
pub use mock_publisher::MockPublisher;
pub use mock_transcoder::MockTranscoder;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::job::{Format, Job, JobRequest};

    /// Create a test job request with reasonable defaults.
    pub fn job_request(title: &str, targets: Vec<Format>) -> JobRequest {
        JobRequest {
            source_url: "http://media.test/source.mkv".to_string(),
            title: title.to_string(),
            targets,
            subtitle_url: None,
            thumbnail_time: 2.0,
            gif_start: 0.0,
            gif_duration: 3.0,
        }
    }

    /// Create a validated test job.
    pub fn job(title: &str, targets: Vec<Format>) -> Job {
        Job::from_request(job_request(title, targets), true)
            .expect("fixture request must be valid")
    }

    /// Create a validated test job requesting every format.
    pub fn full_job(title: &str) -> Job {
        job(title, Format::ALL.to_vec())
    }
}
