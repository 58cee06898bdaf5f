use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediamill_core::{
    load_config, metrics, status_channel, validate_config, Config, FfmpegTranscoder, HttpFetcher,
    Job, JobRequest, JobRunner, JobState, S3Publisher, SanitizedConfig, Transcoder,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Buffer size for status update channel
const STATUS_BUFFER_SIZE: usize = 64;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            2
        }
    };
    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("mediamill {}", VERSION);

    let job_path = std::env::args()
        .nth(1)
        .context("Usage: mediamill <job.json>")?;

    // Determine config path
    let config_path = std::env::var("MEDIAMILL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let sanitized = SanitizedConfig::from(&config);
    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&sanitized).unwrap_or_default()
    );

    // Parse the job request
    let request_json = tokio::fs::read_to_string(&job_path)
        .await
        .with_context(|| format!("Failed to read job file {}", job_path))?;
    let request: JobRequest =
        serde_json::from_str(&request_json).context("Failed to parse job request")?;

    let job = Job::from_request(request, config.pipeline.enable_hls)
        .context("Job request rejected")?;
    info!(job_id = %job.id, title = %job.title, "Accepted job");

    // Register metrics so the final dump is complete
    let registry = prometheus::Registry::new();
    for metric in metrics::all_metrics() {
        registry
            .register(metric)
            .context("Failed to register metrics")?;
    }

    let runner = build_runner(&config).await?;

    // Drain status updates into the log
    let (status, mut status_rx) = status_channel(STATUS_BUFFER_SIZE);
    let drain = tokio::spawn(async move {
        while let Some(update) = status_rx.recv().await {
            info!(
                job_id = %update.job_id,
                "Status: {}",
                serde_json::to_string(&update).unwrap_or_default()
            );
        }
    });

    let runner = runner.with_status(status);
    let result = runner.run(&job).await;

    // Runner holds the only remaining sender; drop it to end the drain.
    drop(runner);
    let _ = drain.await;

    dump_metrics(&registry);

    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("Failed to serialize result")?
    );

    Ok(match result.state {
        JobState::Success => 0,
        _ => 1,
    })
}

async fn build_runner(config: &Config) -> Result<JobRunner> {
    let fetcher = Arc::new(HttpFetcher::new(config.fetch.clone()));
    let transcoder = Arc::new(FfmpegTranscoder::new(config.transcoder.clone()));
    transcoder
        .validate()
        .await
        .context("Encoder validation failed")?;
    let publisher =
        Arc::new(S3Publisher::new(&config.storage).context("Failed to create publisher")?);

    Ok(JobRunner::new(
        config.pipeline.clone(),
        fetcher,
        transcoder,
        publisher,
    ))
}

fn dump_metrics(registry: &prometheus::Registry) {
    use prometheus::Encoder;

    let mut buffer = Vec::new();
    let encoder = prometheus::TextEncoder::new();
    if encoder.encode(&registry.gather(), &mut buffer).is_ok() {
        debug!("Metrics:\n{}", String::from_utf8_lossy(&buffer));
    }
}
