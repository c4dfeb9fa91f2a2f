//! Number-parsing backends
//!
//! A backend performs exactly one request and returns the model's JSON payload
//! (expected to be `{ "value": ... }`). Retry and value extraction live in the
//! resolver, so a backend only has to classify failures correctly:
//! HTTP 429 / 5xx -> `LlmError::Transient`, everything else terminal.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use fincalc_config::constants::{endpoints, server, units};
use fincalc_config::ParserConfig;

use crate::prompt::{Content, GenerateContentRequest};
use crate::LlmError;

/// Backend turning free text into a `{ value }` JSON payload
#[async_trait]
pub trait NumberParsingBackend: Send + Sync {
    /// Issue a single parse request
    async fn parse(&self, text: &str) -> Result<Value, LlmError>;

    /// Model name, for logging
    fn model_name(&self) -> &str;
}

/// Gemini API key header
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini backend configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base, e.g. https://generativelanguage.googleapis.com/v1beta
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: endpoints::GEMINI_DEFAULT.to_string(),
            model: endpoints::GEMINI_MODEL_DEFAULT.to_string(),
            api_key: std::env::var(endpoints::GEMINI_API_KEY_ENV).unwrap_or_default(),
            timeout: Duration::from_secs(server::PARSER_TIMEOUT_SECS),
        }
    }
}

impl From<&ParserConfig> for GeminiConfig {
    fn from(config: &ParserConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout(),
        }
    }
}

/// Gemini `generateContent` backend
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Configuration(
                "API key required for the Gemini backend".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// `{endpoint}/models/{model}:generateContent`; the key travels in a header
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl NumberParsingBackend for GeminiBackend {
    async fn parse(&self, text: &str) -> Result<Value, LlmError> {
        let request = GenerateContentRequest::for_text(text);

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown").to_string();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "Parser request failed");
            return Err(LlmError::from_status(status.as_u16(), reason));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        payload_from_response(body)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// Gemini API response types
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

/// Pull the JSON document out of `candidates[0].content.parts[0].text`
pub(crate) fn payload_from_response(response: GenerateContentResponse) -> Result<Value, LlmError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| LlmError::InvalidResponse("No candidate text in response".to_string()))?;

    serde_json::from_str(text.trim())
        .map_err(|e| LlmError::InvalidResponse(format!("Candidate text is not JSON: {}", e)))
}

/// Matches "1,50,000", "2.5 lakh", "1 cr", "12%", "7.5 percent"
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(-?\d+(?:\.\d+)?)\s*(crores?|cr\b|lakhs?|lacs?|thousand|k\b|%|percent|per cent)?",
    )
    .unwrap()
});

/// Stub backend for development without an API key
///
/// Understands numerals with Indian grouping, lakh/crore/thousand suffixes and
/// percentages. Spelled-out numbers ("one lakh") come back as `{"value": null}`.
#[derive(Debug, Clone, Default)]
pub struct StubNumberBackend;

impl StubNumberBackend {
    pub fn new() -> Self {
        Self
    }

    fn interpret(text: &str) -> Option<f64> {
        let cleaned = text.replace(',', "");
        let captures = AMOUNT_PATTERN.captures(&cleaned)?;
        let number: f64 = captures.get(1)?.as_str().parse().ok()?;

        let multiplier = match captures.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(unit) if unit.starts_with("cr") => units::CRORE,
            Some(unit) if unit.starts_with("la") => units::LAKH,
            Some(unit) if unit == "k" || unit == "thousand" => 1_000.0,
            _ => 1.0,
        };

        Some(number * multiplier)
    }
}

#[async_trait]
impl NumberParsingBackend for StubNumberBackend {
    async fn parse(&self, text: &str) -> Result<Value, LlmError> {
        let value = Self::interpret(text);
        tracing::debug!(text = %text, value = ?value, "Stub parser: interpreted text");
        Ok(json!({ "value": value }))
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: Value) -> GenerateContentResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_gemini_requires_api_key() {
        let config = GeminiConfig {
            api_key: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            GeminiBackend::new(config),
            Err(LlmError::Configuration(_))
        ));
    }

    #[test]
    fn test_generate_url() {
        let config = GeminiConfig {
            endpoint: "https://example.test/v1beta/".to_string(),
            model: "gemini-test".to_string(),
            api_key: "key".to_string(),
            timeout: Duration::from_secs(5),
        };
        let backend = GeminiBackend::new(config).unwrap();
        assert_eq!(
            backend.generate_url(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
        assert_eq!(backend.model_name(), "gemini-test");
    }

    #[test]
    fn test_config_from_parser_config() {
        let parser = ParserConfig {
            api_key: "abc".to_string(),
            timeout_secs: 7,
            ..Default::default()
        };
        let config = GeminiConfig::from(&parser);
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.model, parser.model);
    }

    #[test]
    fn test_payload_from_response() {
        let body = response(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"value\": 150000}" }] }
            }]
        }));
        let payload = payload_from_response(body).unwrap();
        assert_eq!(payload["value"], 150000);
    }

    #[test]
    fn test_payload_missing_candidates() {
        let body = response(json!({ "candidates": [] }));
        assert!(matches!(
            payload_from_response(body),
            Err(LlmError::InvalidResponse(_))
        ));

        let body = response(json!({}));
        assert!(payload_from_response(body).is_err());

        let body = response(json!({ "candidates": [{ "content": { "parts": [] } }] }));
        assert!(payload_from_response(body).is_err());
    }

    #[test]
    fn test_payload_text_not_json() {
        let body = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "one lakh" }] } }]
        }));
        assert!(matches!(
            payload_from_response(body),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_stub_interpretation() {
        assert_eq!(StubNumberBackend::interpret("5000"), Some(5000.0));
        assert_eq!(StubNumberBackend::interpret("1,50,000"), Some(150_000.0));
        assert_eq!(StubNumberBackend::interpret("2.5 lakh"), Some(250_000.0));
        assert_eq!(StubNumberBackend::interpret("1 Crore"), Some(10_000_000.0));
        assert_eq!(StubNumberBackend::interpret("12%"), Some(12.0));
        assert_eq!(StubNumberBackend::interpret("7.5 percent"), Some(7.5));
        assert_eq!(StubNumberBackend::interpret("50k"), Some(50_000.0));
        assert_eq!(StubNumberBackend::interpret("one lakh"), None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_keeps_key_out_of_error() {
        let config = GeminiConfig {
            endpoint: "http://127.0.0.1:1/v1beta".to_string(),
            model: "m".to_string(),
            api_key: "SECRETKEY123".to_string(),
            timeout: Duration::from_secs(5),
        };
        let backend = GeminiBackend::new(config).unwrap();

        let err = backend.parse("5000").await.unwrap_err();
        assert!(!err.is_transient());
        assert!(!err.to_string().contains("SECRETKEY123"), "{}", err);
    }

    #[tokio::test]
    async fn test_stub_payload_shape() {
        let backend = StubNumberBackend::new();
        let payload = backend.parse("3 lakh").await.unwrap();
        assert_eq!(payload, json!({ "value": 300000.0 }));

        let payload = backend.parse("no digits here").await.unwrap();
        assert!(payload["value"].is_null());
    }
}
