//! HTTP fetcher implementation backed by reqwest.

use async_trait::async_trait;
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::config::FetcherConfig;
use super::error::FetchError;
use super::traits::{FetchedFile, Fetcher};

/// Streams remote resources to disk over HTTP(S).
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a new fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Creates a fetcher with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(FetcherConfig::default())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<FetchedFile, FetchError> {
        debug!("Fetching {} -> {}", url, dest.display());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file =
            tokio::fs::File::create(dest)
                .await
                .map_err(|source| FetchError::Write {
                    path: dest.to_path_buf(),
                    source,
                })?;

        // Stream chunk by chunk; the payload never sits in memory.
        let mut stream = response.bytes_stream();
        let mut size_bytes: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|source| FetchError::Write {
                    path: dest.to_path_buf(),
                    source,
                })?;
            size_bytes += chunk.len() as u64;
        }

        file.flush().await.map_err(|source| FetchError::Write {
            path: dest.to_path_buf(),
            source,
        })?;

        info!("Fetched {} bytes from {}", size_bytes, url);
        Ok(FetchedFile {
            path: dest.to_path_buf(),
            size_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_rejects_unreachable_host() {
        let fetcher = HttpFetcher::new(FetcherConfig { timeout_secs: 1 });
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");

        // Reserved TEST-NET address, nothing listens there.
        let result = fetcher.fetch("http://192.0.2.1:9/file", &dest).await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
