use serde::{Deserialize, Serialize};

use crate::fetcher::FetcherConfig;
use crate::pipeline::PipelineConfig;
use crate::transcoder::TranscoderConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub fetch: FetcherConfig,
    #[serde(default)]
    pub transcoder: TranscoderConfig,
}

/// Durable-storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Target bucket. Required; validated as non-empty.
    pub bucket: String,
    /// Bucket region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint URL (MinIO); enables path-style addressing.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Static access key.
    #[serde(default)]
    pub access_key: String,
    /// Static secret key.
    #[serde(default)]
    pub secret_key: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Sanitized config for logging/status surfaces (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub storage: SanitizedStorageConfig,
    pub pipeline: PipelineConfig,
    pub fetch: FetcherConfig,
    pub transcoder: TranscoderConfig,
}

/// Sanitized storage config (credentials hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedStorageConfig {
    pub bucket: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub credentials_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            storage: SanitizedStorageConfig {
                bucket: config.storage.bucket.clone(),
                region: config.storage.region.clone(),
                endpoint: config.storage.endpoint.clone(),
                credentials_configured: !config.storage.access_key.is_empty()
                    && !config.storage.secret_key.is_empty(),
            },
            pipeline: config.pipeline.clone(),
            fetch: config.fetch.clone(),
            transcoder: config.transcoder.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[storage]
bucket = "media-artifacts"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.storage.bucket, "media-artifacts");
        assert_eq!(config.storage.region, "us-east-1");
        assert!(!config.pipeline.enable_hls);
        assert_eq!(config.pipeline.retry.max_attempts, 3);
    }

    #[test]
    fn test_deserialize_missing_storage_fails() {
        let toml = r#"
[pipeline]
enable_hls = true
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[storage]
bucket = "media"
region = "eu-west-1"
endpoint = "http://minio:9000"
access_key = "ak"
secret_key = "sk"

[pipeline]
workspace_root = "/var/lib/mediamill"
enable_hls = true

[pipeline.retry]
max_attempts = 5
initial_delay_secs = 2

[fetch]
timeout_secs = 60

[transcoder]
timeout_secs = 120
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.storage.endpoint.as_deref(), Some("http://minio:9000"));
        assert!(config.pipeline.enable_hls);
        assert_eq!(config.pipeline.retry.max_attempts, 5);
        assert_eq!(config.fetch.timeout_secs, 60);
        assert_eq!(config.transcoder.timeout_secs, 120);
    }

    #[test]
    fn test_sanitized_config_hides_credentials() {
        let toml = r#"
[storage]
bucket = "media"
access_key = "ak"
secret_key = "sk"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.storage.credentials_configured);
        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("\"ak\""));
        assert!(!json.contains("\"sk\""));
    }
}
