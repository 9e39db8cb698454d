//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested enums (e.g., [`ConfigError`],
//! [`ProviderError`], [`HealthError`]). Small helpers for reading/validating
//! environment variables are provided and return the unified [`Result<T>`] alias.
//!
//! Callers never get a completion text and an error through the same channel:
//! a completion is `Ok(String)`, a failure is an [`AiLlmError`] with a stable
//! [`AiLlmError::kind`] code. [`AiLlmError::user_message`] renders the failure
//! for display when a caller wants a plain sentence.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/// Maximum number of characters kept from an upstream response body.
pub const SNIPPET_MAX_CHARS: usize = 240;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider call failed (HTTP status, decode, empty choices, ...).
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Health-check/connectivity/decoding errors.
    #[error(transparent)]
    Health(#[from] HealthError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Operation exceeded the configured timeout.
    #[error("[AI LLM Service] operation timed out after {0:?}")]
    Timeout(Duration),
}

impl AiLlmError {
    /// Stable, machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            AiLlmError::Config(_) => "CONFIG_ERROR",
            AiLlmError::Provider(p) => match &p.kind {
                ProviderErrorKind::InvalidProvider => "INVALID_PROVIDER",
                ProviderErrorKind::MissingApiKey => "MISSING_API_KEY",
                ProviderErrorKind::InvalidEndpoint(_) => "INVALID_ENDPOINT",
                ProviderErrorKind::HttpStatus(_) => "COMPLETION_HTTP_STATUS",
                ProviderErrorKind::Decode(_) => "COMPLETION_DECODE",
                ProviderErrorKind::EmptyChoices => "COMPLETION_EMPTY",
            },
            AiLlmError::Health(_) => "HEALTH_ERROR",
            AiLlmError::HttpTransport(_) => "COMPLETION_TRANSPORT_ERROR",
            AiLlmError::Timeout(_) => "COMPLETION_TIMEOUT",
        }
    }

    /// Maps a failed request: client-side timeouts become [`AiLlmError::Timeout`]
    /// with the configured limit, everything else stays a transport error.
    pub fn from_send(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            AiLlmError::Timeout(timeout)
        } else {
            AiLlmError::HttpTransport(err)
        }
    }

    /// Response body snippet returned by the upstream, if any was received.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::HttpStatus(http),
                ..
            })
            | AiLlmError::Health(HealthError::HttpStatus(http)) => Some(http.snippet.as_str()),
            _ => None,
        }
    }

    /// Human-readable rendering: the error message followed by the raw
    /// response body, or `No response` when nothing came back.
    pub fn user_message(&self) -> String {
        format!(
            "Completion API error: {self}\n\nResponse: {}",
            self.response_body().unwrap_or("No response")
        )
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like ports, limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`, `OLLAMA_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Unsupported provider name.
    #[error("[AI LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `LLM_ENDPOINT`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Which backend produced a [`ProviderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
    OpenAI,
}

/// Details of a non-successful HTTP response.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Short snippet of the response body (trimmed).
    pub snippet: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} from {}", self.status, self.url)
    }
}

/// What went wrong while talking to a provider.
#[derive(Debug)]
pub enum ProviderErrorKind {
    /// The config names a different provider than the service expects.
    InvalidProvider,
    /// An API key is required but absent.
    MissingApiKey,
    /// The endpoint is empty or does not start with http/https.
    InvalidEndpoint(String),
    /// Upstream returned a non-successful HTTP status.
    HttpStatus(HttpError),
    /// Response payload could not be decoded as expected.
    Decode(String),
    /// Response contained no usable choice.
    EmptyChoices,
}

/// Provider-scoped error.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider:?}: {}", describe_kind(.kind))]
pub struct ProviderError {
    pub provider: Provider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: Provider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

fn describe_kind(kind: &ProviderErrorKind) -> String {
    match kind {
        ProviderErrorKind::InvalidProvider => "config is for a different provider".into(),
        ProviderErrorKind::MissingApiKey => "API key is missing".into(),
        ProviderErrorKind::InvalidEndpoint(e) => format!("invalid endpoint: {e}"),
        ProviderErrorKind::HttpStatus(h) => h.to_string(),
        ProviderErrorKind::Decode(msg) => format!("decode error: {msg}"),
        ProviderErrorKind::EmptyChoices => "response contained no choices".into(),
    }
}

/* ------------------------------------------------------------------------- */
/* Health errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for provider health checks.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HealthError {
    /// The endpoint is empty or does not start with http/https.
    #[error("[AI LLM Service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("[AI LLM Service] {0}")]
    HttpStatus(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("[AI LLM Service] decode error: {0}")]
    Decode(String),
}

/// Cuts a response body down to [`SNIPPET_MAX_CHARS`] characters.
pub fn make_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= SNIPPET_MAX_CHARS {
        trimmed.to_string()
    } else {
        let mut s: String = trimmed.chars().take(SNIPPET_MAX_CHARS).collect();
        s.push('…');
        s
    }
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Reads an optional, non-empty environment variable.
pub fn opt_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    parse_opt(name, "expected u32")
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    parse_opt(name, "expected u64")
}

/// Parses an optional `f32` from env (`Ok(None)` if unset/empty).
pub fn env_opt_f32(name: &'static str) -> Result<Option<f32>> {
    parse_opt(name, "expected a decimal number")
}

fn parse_opt<T: std::str::FromStr>(name: &'static str, reason: &'static str) -> Result<Option<T>> {
    match opt_env(name) {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AiLlmError::from(ConfigError::InvalidNumber { var: name, reason })),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
pub fn validate_range_f32(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_trimmed_and_clamped() {
        assert_eq!(make_snippet("  short body \n"), "short body");
        let long = "x".repeat(SNIPPET_MAX_CHARS + 50);
        let s = make_snippet(&long);
        assert_eq!(s.chars().count(), SNIPPET_MAX_CHARS + 1);
        assert!(s.ends_with('…'));
    }

    #[test]
    fn http_status_error_exposes_body_and_kind() {
        let err = AiLlmError::from(ProviderError::new(
            Provider::OpenAI,
            ProviderErrorKind::HttpStatus(HttpError {
                status: StatusCode::UNAUTHORIZED,
                url: "https://api.example.com/v1/chat/completions".into(),
                snippet: r#"{"error":"invalid api key"}"#.into(),
            }),
        ));
        assert_eq!(err.kind(), "COMPLETION_HTTP_STATUS");
        assert_eq!(err.response_body(), Some(r#"{"error":"invalid api key"}"#));
        let msg = err.user_message();
        assert!(msg.starts_with("Completion API error:"));
        assert!(msg.contains("401"));
        assert!(msg.ends_with(r#"Response: {"error":"invalid api key"}"#));
    }

    #[test]
    fn errors_without_body_use_placeholder() {
        let err = AiLlmError::from(ProviderError::new(
            Provider::OpenAI,
            ProviderErrorKind::EmptyChoices,
        ));
        assert_eq!(err.kind(), "COMPLETION_EMPTY");
        assert!(err.user_message().ends_with("Response: No response"));
    }

    #[test]
    fn range_and_endpoint_validation() {
        assert!(validate_range_f32("temperature", 0.5, 0.0, 2.0).is_ok());
        assert!(validate_range_f32("temperature", 2.5, 0.0, 2.0).is_err());
        assert!(validate_range_f32("temperature", f32::NAN, 0.0, 2.0).is_err());
        assert!(validate_http_endpoint("LLM_ENDPOINT", "https://api.groq.com/openai").is_ok());
        assert!(validate_http_endpoint("LLM_ENDPOINT", "api.groq.com").is_err());
    }
}
