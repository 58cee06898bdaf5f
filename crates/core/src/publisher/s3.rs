//! S3-compatible publisher implementation.

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Builder, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;
use tracing::info;

use crate::config::StorageConfig;

use super::error::PublishError;
use super::traits::{PublishedArtifact, Publisher};

/// Publishes artifacts to an S3 (or MinIO) bucket with `put_object`.
pub struct S3Publisher {
    client: Client,
    bucket: String,
}

impl S3Publisher {
    /// Creates a publisher from storage configuration.
    ///
    /// Fails with [`PublishError::BucketNotConfigured`] when no bucket
    /// is set; this is surfaced before any pipeline work starts.
    pub fn new(config: &StorageConfig) -> Result<Self, PublishError> {
        if config.bucket.is_empty() {
            return Err(PublishError::BucketNotConfigured);
        }

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "static",
        );

        let mut builder = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        // Custom endpoints (MinIO) need path-style addressing.
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(builder.build());
        Ok(Self {
            client,
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl Publisher for S3Publisher {
    async fn publish(&self, local: &Path, key: &str) -> Result<PublishedArtifact, PublishError> {
        let size_bytes = tokio::fs::metadata(local)
            .await
            .map_err(|e| PublishError::Read {
                path: local.to_path_buf(),
                message: e.to_string(),
            })?
            .len();

        // Streams the file from disk rather than buffering it.
        let body = ByteStream::from_path(local)
            .await
            .map_err(|e| PublishError::Read {
                path: local.to_path_buf(),
                message: e.to_string(),
            })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| PublishError::Transport {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        info!("Published s3://{}/{} ({} bytes)", self.bucket, key, size_bytes);

        let name = key.rsplit('/').next().unwrap_or(key).to_string();
        Ok(PublishedArtifact {
            key: key.to_string(),
            name,
            size_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_config(bucket: &str) -> StorageConfig {
        StorageConfig {
            bucket: bucket.to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key: "key".to_string(),
            secret_key: "secret".to_string(),
        }
    }

    #[test]
    fn test_new_rejects_missing_bucket() {
        let result = S3Publisher::new(&storage_config(""));
        assert!(matches!(result, Err(PublishError::BucketNotConfigured)));
    }

    #[test]
    fn test_new_with_bucket() {
        let publisher = S3Publisher::new(&storage_config("media")).unwrap();
        assert_eq!(publisher.bucket, "media");
    }
}
