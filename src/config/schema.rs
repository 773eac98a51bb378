//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a harvest run.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for transfer-scout.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScoutConfig {
    /// Generative search API settings.
    pub api: ApiConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Input/output and pacing of the run.
    pub harvest: HarvestConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Generative search API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, without the trailing `/models/...` segment.
    pub base_url: String,

    /// Model name used in the `generateContent` path.
    pub model: String,

    /// Environment variable holding the API key.
    ///
    /// The key itself never lives in the config file.
    pub api_key_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash-preview-09-2025".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

impl ApiConfig {
    /// Full `generateContent` endpoint for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Hard ceiling on attempts per university (not retries after the first).
    pub max_retries: u32,

    /// Delay before the second attempt; doubles after each failure.
    pub initial_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-attempt request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

impl TimeoutConfig {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

/// Harvest run configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// JSON file listing universities.
    pub input_path: PathBuf,

    /// Directory receiving one report per university.
    pub output_dir: PathBuf,

    /// Pause between universities in seconds.
    pub politeness_delay_secs: u64,

    /// Report body used when a successful response lacks the text field.
    pub extraction_fallback: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("tester.json"),
            output_dir: PathBuf::from("colleges"),
            politeness_delay_secs: 3,
            extraction_fallback: "Failed to generate report text.".to_string(),
        }
    }
}

impl HarvestConfig {
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_secs(self.politeness_delay_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Where to write a Prometheus text snapshot at the end of the run.
    /// Empty disables the snapshot.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_path: String::new(),
        }
    }
}
