use super::{types::Config, ConfigError};

/// Validates a loaded configuration before any pipeline work starts.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.storage.bucket.is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.bucket must not be empty".to_string(),
        ));
    }

    if config.pipeline.retry.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "pipeline.retry.max_attempts must be at least 1".to_string(),
        ));
    }

    if config.pipeline.retry.backoff_multiplier < 1.0 {
        return Err(ConfigError::ValidationError(
            "pipeline.retry.backoff_multiplier must be >= 1.0".to_string(),
        ));
    }

    if config.pipeline.workspace_root.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "pipeline.workspace_root must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn config_with(storage_bucket: &str, extra: &str) -> Result<Config, ConfigError> {
        load_config_from_str(&format!(
            r#"
[storage]
bucket = "{}"
{}
"#,
            storage_bucket, extra
        ))
    }

    #[test]
    fn test_validate_ok() {
        let config = config_with("media", "").unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_bucket() {
        let config = config_with("", "").unwrap();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let config = config_with("media", "[pipeline.retry]\nmax_attempts = 0").unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_shrinking_backoff() {
        let config = config_with("media", "[pipeline.retry]\nbackoff_multiplier = 0.5").unwrap();
        assert!(validate_config(&config).is_err());
    }
}
