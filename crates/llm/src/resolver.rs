//! Text-to-number resolver
//!
//! Wraps a `NumberParsingBackend` with the retry policy:
//! - empty or whitespace-only text resolves to `None` without a remote call
//! - transient failures (429 / 5xx) are retried with exponential backoff
//! - any other failure, or a payload without a usable number, ends the call
//!
//! The resolver never returns an error: every failure path yields `None`,
//! which calculators treat the same as invalid user input.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use fincalc_config::constants::retry;
use fincalc_config::ParserConfig;

use crate::backend::NumberParsingBackend;

/// Bounded exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles afterwards
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: retry::MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(retry::INITIAL_BACKOFF_MS),
        }
    }
}

impl From<&ParserConfig> for RetryPolicy {
    fn from(config: &ParserConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_backoff: config.initial_backoff(),
        }
    }
}

/// Bookkeeping for one resolution call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseAttempt {
    pub raw_text: String,
    pub resolved_value: Option<f64>,
    /// Requests issued to the backend
    pub attempt_count: u32,
    pub last_error: Option<String>,
    /// Delays slept between attempts, in order
    pub backoffs: Vec<Duration>,
}

impl ParseAttempt {
    fn new(raw_text: &str) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            resolved_value: None,
            attempt_count: 0,
            last_error: None,
            backoffs: Vec::new(),
        }
    }
}

/// Read the numeric `value` out of a model payload
///
/// Accepts a JSON number, or a string that parses cleanly to a finite number.
pub fn extract_value(payload: &Value) -> Option<f64> {
    match payload.get("value")? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Resolves free text ("1.5 lakh", "12 percent") to a number
#[derive(Clone)]
pub struct TextToNumberResolver {
    backend: Arc<dyn NumberParsingBackend>,
    policy: RetryPolicy,
}

impl TextToNumberResolver {
    pub fn new(backend: Arc<dyn NumberParsingBackend>, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn with_default_policy(backend: Arc<dyn NumberParsingBackend>) -> Self {
        Self::new(backend, RetryPolicy::default())
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Resolve text to a number, or `None` on any failure
    pub async fn resolve(&self, text: &str) -> Option<f64> {
        self.resolve_attempt(text).await.resolved_value
    }

    /// Resolve text and return the full attempt record
    pub async fn resolve_attempt(&self, text: &str) -> ParseAttempt {
        let mut attempt = ParseAttempt::new(text);

        if text.trim().is_empty() {
            return attempt;
        }

        let max_attempts = self.policy.max_attempts.max(1);
        let mut backoff = self.policy.initial_backoff;

        for n in 0..max_attempts {
            if n > 0 {
                tracing::warn!(
                    "Parser request failed, retrying in {:?} (attempt {}/{})",
                    backoff,
                    n + 1,
                    max_attempts
                );
                metrics::counter!("fincalc_resolver_retries_total").increment(1);
                tokio::time::sleep(backoff).await;
                attempt.backoffs.push(backoff);
                backoff *= 2;
            }

            attempt.attempt_count += 1;
            metrics::counter!("fincalc_resolver_attempts_total").increment(1);

            match self.backend.parse(text).await {
                Ok(payload) => {
                    match extract_value(&payload) {
                        Some(value) => {
                            tracing::debug!(
                                text = %text,
                                value,
                                attempts = attempt.attempt_count,
                                model = self.backend.model_name(),
                                "Resolved text to number"
                            );
                            attempt.resolved_value = Some(value);
                            attempt.last_error = None;
                        }
                        None => {
                            tracing::error!(
                                text = %text,
                                payload = %payload,
                                "Parser returned no usable numeric value"
                            );
                            metrics::counter!("fincalc_resolver_failures_total").increment(1);
                            attempt.last_error =
                                Some(format!("No numeric value in response: {}", payload));
                        }
                    }
                    return attempt;
                }
                Err(e) if e.is_transient() => {
                    attempt.last_error = Some(e.to_string());
                }
                Err(e) => {
                    tracing::error!(text = %text, error = %e, "Error during text parsing");
                    metrics::counter!("fincalc_resolver_failures_total").increment(1);
                    attempt.last_error = Some(e.to_string());
                    return attempt;
                }
            }
        }

        tracing::error!(
            text = %text,
            attempts = attempt.attempt_count,
            "Parser retries exhausted"
        );
        metrics::counter!("fincalc_resolver_failures_total").increment(1);
        attempt
    }
}
