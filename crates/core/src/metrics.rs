//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Pipeline (attempts, retries, terminal outcomes, durations)
//! - Stages (fetch, transcode, publish)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

/// Pipeline attempts total by result.
pub static PIPELINE_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediamill_pipeline_attempts_total",
            "Total pipeline attempts",
        ),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

/// Jobs reaching a terminal state, by state.
pub static JOBS_COMPLETED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediamill_jobs_completed_total", "Jobs reaching a terminal state"),
        &["state"], // "success", "failure"
    )
    .unwrap()
});

/// Retry delays taken between attempts.
pub static RETRY_ATTEMPTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "mediamill_retry_attempts_total",
        "Total retries after a failed attempt",
    )
    .unwrap()
});

/// Whole-attempt duration in seconds by result.
pub static ATTEMPT_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediamill_attempt_duration_seconds",
            "Duration of one pipeline attempt",
        )
        .buckets(vec![1.0, 5.0, 15.0, 60.0, 300.0, 900.0, 3600.0]),
        &["result"],
    )
    .unwrap()
});

/// Transcode invocations total by format.
pub static TRANSCODES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediamill_transcodes_total", "Total transcode invocations"),
        &["format", "result"],
    )
    .unwrap()
});

/// Encoder invocation duration in seconds by format.
pub static TRANSCODE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediamill_transcode_duration_seconds",
            "Duration of one encoder invocation",
        )
        .buckets(vec![0.5, 2.0, 10.0, 30.0, 120.0, 600.0, 1800.0]),
        &["format"],
    )
    .unwrap()
});

/// Artifacts published to durable storage.
pub static ARTIFACTS_PUBLISHED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "mediamill_artifacts_published_total",
        "Total artifacts uploaded to durable storage",
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(PIPELINE_ATTEMPTS.clone()),
        Box::new(JOBS_COMPLETED.clone()),
        Box::new(RETRY_ATTEMPTS.clone()),
        Box::new(ATTEMPT_DURATION.clone()),
        Box::new(TRANSCODES_TOTAL.clone()),
        Box::new(TRANSCODE_DURATION.clone()),
        Box::new(ARTIFACTS_PUBLISHED.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_metrics_register() {
        let registry = prometheus::Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }
    }
}
