//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (retries >= 1, delays and timeouts > 0)
//! - Check the API endpoint is an http(s) URL
//!
//! Returns all validation errors, not just the first.

use crate::config::schema::ScoutConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ScoutConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.retries.max_retries == 0 {
        errors.push(ValidationError::new(
            "retries.max_retries",
            "must allow at least one attempt",
        ));
    }

    if config.retries.initial_delay_ms == 0 {
        errors.push(ValidationError::new(
            "retries.initial_delay_ms",
            "must be greater than zero",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    match url::Url::parse(&config.api.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "api.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "api.base_url",
            format!("invalid URL '{}': {}", config.api.base_url, e),
        )),
    }

    if config.api.model.trim().is_empty() {
        errors.push(ValidationError::new("api.model", "must not be empty"));
    }

    if config.api.api_key_env.trim().is_empty() {
        errors.push(ValidationError::new("api.api_key_env", "must not be empty"));
    }

    if config.harvest.input_path.as_os_str().is_empty() {
        errors.push(ValidationError::new("harvest.input_path", "must not be empty"));
    }

    if config.harvest.output_dir.as_os_str().is_empty() {
        errors.push(ValidationError::new("harvest.output_dir", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
