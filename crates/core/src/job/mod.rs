//! Job model: submissions, validation and terminal results.
//!
//! A [`JobRequest`] is what the intake surface hands us; [`Job`] is the
//! validated, immutable form the pipeline executes. Validation happens
//! exactly once, at submission time: duplicate targets and targets that
//! are disabled by configuration are rejected here, never discovered
//! halfway through a pipeline run.

mod title;
mod types;

pub use title::{build_output_key, safe_title};
pub use types::{Format, Job, JobError, JobRequest, JobResult, JobState};
