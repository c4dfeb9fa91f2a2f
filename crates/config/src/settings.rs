//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants::{endpoints, retry, server};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation
    #[default]
    Development,
    /// Staging mode
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote text-to-number service
    #[serde(default)]
    pub parser: ParserConfig,

    /// Logging and metrics
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Calculator session (saved results)
    #[serde(default)]
    pub session: SessionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    server::DEFAULT_PORT
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Text-to-number parsing service (Gemini generateContent)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// API base, e.g. https://generativelanguage.googleapis.com/v1beta
    #[serde(default = "default_parser_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_parser_model")]
    pub model: String,

    /// API key; falls back to GEMINI_API_KEY
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Per-request timeout
    #[serde(default = "default_parser_timeout")]
    pub timeout_secs: u64,

    /// Total attempts including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First backoff delay, doubled after each transient failure
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

fn default_parser_endpoint() -> String {
    endpoints::GEMINI_DEFAULT.to_string()
}

fn default_parser_model() -> String {
    endpoints::GEMINI_MODEL_DEFAULT.to_string()
}

fn default_api_key() -> String {
    std::env::var(endpoints::GEMINI_API_KEY_ENV).unwrap_or_default()
}

fn default_parser_timeout() -> u64 {
    server::PARSER_TIMEOUT_SECS
}

fn default_max_attempts() -> u32 {
    retry::MAX_ATTEMPTS
}

fn default_initial_backoff_ms() -> u64 {
    retry::INITIAL_BACKOFF_MS
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_parser_endpoint(),
            model: default_parser_model(),
            api_key: default_api_key(),
            timeout_secs: default_parser_timeout(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

impl ParserConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub log_json: bool,

    /// Expose /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Calculator session configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Cap on the saved-results log; oldest entries are evicted. None = unbounded
    #[serde(default)]
    pub max_saved_results: Option<usize>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_parser()?;
        self.validate_session()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }
        Ok(())
    }

    fn validate_parser(&self) -> Result<(), ConfigError> {
        let parser = &self.parser;

        if !(1..=retry::MAX_ATTEMPTS_LIMIT).contains(&parser.max_attempts) {
            return Err(ConfigError::InvalidValue {
                field: "parser.max_attempts".to_string(),
                message: format!(
                    "Must be between 1 and {}, got {}",
                    retry::MAX_ATTEMPTS_LIMIT,
                    parser.max_attempts
                ),
            });
        }

        if parser.initial_backoff_ms > retry::MAX_INITIAL_BACKOFF_MS {
            return Err(ConfigError::InvalidValue {
                field: "parser.initial_backoff_ms".to_string(),
                message: format!(
                    "Must be at most {}ms, got {}ms",
                    retry::MAX_INITIAL_BACKOFF_MS,
                    parser.initial_backoff_ms
                ),
            });
        }

        if parser.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "parser.timeout_secs".to_string(),
                message: "Timeout must be greater than 0".to_string(),
            });
        }

        if parser.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingField("parser.endpoint".to_string()));
        }

        if parser.api_key.trim().is_empty() {
            if self.environment.is_production() {
                return Err(ConfigError::MissingField("parser.api_key".to_string()));
            }
            tracing::warn!(
                "No parser API key configured; free-text inputs will not resolve"
            );
        }

        Ok(())
    }

    fn validate_session(&self) -> Result<(), ConfigError> {
        if self.session.max_saved_results == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "session.max_saved_results".to_string(),
                message: "Must be at least 1 (omit for unbounded)".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from `config/` and the environment
///
/// Priority: env vars > config/{env} > config/default > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit config directory
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(
        File::with_name(&dir.join("default").to_string_lossy()).required(false),
    );

    // Load environment-specific config
    if let Some(env_name) = env {
        builder = builder
            .add_source(File::with_name(&dir.join(env_name).to_string_lossy()).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("FINCALC")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    Ok(settings)
}
