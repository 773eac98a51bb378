//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use secrecy::SecretString;

use crate::config::schema::ScoutConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read and parse a TOML file without validating it.
///
/// Used when more layers (CLI flags) are applied before validation.
pub fn parse_config(path: &Path) -> Result<ScoutConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ScoutConfig, ConfigError> {
    let config = parse_config(path)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read the API key from the environment variable named in the config.
///
/// A missing or blank variable yields `None`; the request executor turns that
/// into a precondition failure rather than an error here.
pub fn api_key_from_env(config: &ScoutConfig) -> Option<SecretString> {
    std::env::var(&config.api.api_key_env)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}
