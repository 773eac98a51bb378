//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI flag overrides (main.rs, re-validated)
//!     → ScoutConfig (validated, immutable for the run)
//!
//! API key:
//!     environment variable named by api.api_key_env
//!     → SecretString, handed to the request executor
//! ```
//!
//! All fields have defaults so an empty file (or no file) is a valid config.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{api_key_from_env, load_config, parse_config, ConfigError};
pub use schema::{
    ApiConfig, HarvestConfig, ObservabilityConfig, RetryConfig, ScoutConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
