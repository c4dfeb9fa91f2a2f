//! Text-to-number resolution
//!
//! Features:
//! - Gemini `generateContent` backend with a fixed `{ value: number }` schema
//! - Offline stub backend for development without an API key
//! - Resolver with bounded exponential-backoff retry on 429 / 5xx

pub mod backend;
pub mod prompt;
pub mod resolver;

pub use backend::{GeminiBackend, GeminiConfig, NumberParsingBackend, StubNumberBackend};
pub use prompt::{GenerateContentRequest, SYSTEM_INSTRUCTION};
pub use resolver::{extract_value, ParseAttempt, RetryPolicy, TextToNumberResolver};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Rate limit or server-side failure; worth retrying
    #[error("Transient API error {status}: {message}")]
    Transient { status: u16, message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LlmError {
    /// Classify a non-success HTTP status: 429 and 5xx are transient
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == 429 || (500..600).contains(&status) {
            LlmError::Transient { status, message }
        } else {
            LlmError::Api { status, message }
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Transient { .. })
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            // URLs may carry credentials; never let them into messages or logs
            LlmError::Network(err.without_url().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(LlmError::from_status(429, "slow down").is_transient());
        assert!(LlmError::from_status(500, "boom").is_transient());
        assert!(LlmError::from_status(503, "unavailable").is_transient());
        assert!(!LlmError::from_status(400, "bad request").is_transient());
        assert!(!LlmError::from_status(401, "unauthorized").is_transient());
        assert!(!LlmError::from_status(404, "not found").is_transient());
    }

    #[test]
    fn test_only_status_errors_are_transient() {
        assert!(!LlmError::Network("connection refused".into()).is_transient());
        assert!(!LlmError::Timeout.is_transient());
        assert!(!LlmError::InvalidResponse("no candidates".into()).is_transient());
    }
}
