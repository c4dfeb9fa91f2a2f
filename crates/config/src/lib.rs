//! Configuration management for fincalc
//!
//! Supports loading configuration from:
//! - `config/default.{toml,yaml,json}`
//! - `config/{env}.{toml,yaml,json}`
//! - Environment variables (`FINCALC_` prefix, `__` as section separator)

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, load_settings_from, ObservabilityConfig, ParserConfig, RuntimeEnvironment,
    ServerConfig, SessionConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => ConfigError::MissingField(key),
            other => ConfigError::ParseError(other.to_string()),
        }
    }
}
