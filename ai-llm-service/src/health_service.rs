//! Health probes for the configured LLM backends.
//!
//! - Ollama: `GET {endpoint}/api/tags`, then look for the model tag
//! - OpenAI-compatible: `GET {endpoint}/v1/models` with Bearer auth, then look for the model id
//!
//! [`HealthService::check`] never fails: any error becomes `ok = false` with
//! the error text as the message, which is what a `/health` route wants.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, HealthError, HttpError, make_snippet};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g., "Ollama", "OpenAI").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier the probe looked for.
    pub model: Option<String>,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: Some(cfg.model.clone()),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// A health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds, default 10).
    ///
    /// # Errors
    /// Returns [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        debug!(default_timeout_secs = timeout.as_secs(), "HealthService initialized");
        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Checks health for a single LLM config. Never returns an error.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let start = Instant::now();
        match self.try_probe(cfg).await {
            Ok(status) => {
                info!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status = HealthStatus::new(cfg, false, start.elapsed().as_millis(), err.to_string());
                warn!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    message = %status.message,
                    "health probe failed"
                );
                status
            }
        }
    }

    /// Checks health for multiple configs in order.
    pub async fn check_many(&self, configs: &[LlmModelConfig]) -> Vec<HealthStatus> {
        let mut out = Vec::with_capacity(configs.len());
        for cfg in configs {
            out.push(self.check(cfg).await);
        }
        out
    }

    /// Strict probe. Returns an error on hard failures (bad endpoint,
    /// transport, non-2xx). A reachable server with an undecodable listing
    /// counts as healthy.
    async fn try_probe(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(HealthError::InvalidEndpoint(cfg.endpoint.clone()).into());
        }
        let base = endpoint.trim_end_matches('/');
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout);

        let (url, req) = match cfg.provider {
            LlmProvider::Ollama => {
                let url = format!("{base}/api/tags");
                let req = self.client.get(&url);
                (url, req)
            }
            LlmProvider::OpenAI => {
                let url = format!("{base}/v1/models");
                let key = cfg
                    .api_key
                    .as_deref()
                    .ok_or_else(|| HealthError::Decode("missing API key".into()))?;
                let mut auth = header::HeaderValue::from_str(&format!("Bearer {key}"))
                    .map_err(|e| HealthError::Decode(format!("invalid API key header: {e}")))?;
                auth.set_sensitive(true);
                let req = self.client.get(&url).header(header::AUTHORIZATION, auth);
                (url, req)
            }
        };

        debug!(provider = ?cfg.provider, "GET {url}");
        let start = Instant::now();
        let resp = req.timeout(timeout).send().await?;
        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(HealthError::HttpStatus(HttpError {
                status,
                url,
                snippet: make_snippet(&text),
            })
            .into());
        }

        let listed = match cfg.provider {
            LlmProvider::Ollama => resp
                .json::<OllamaTags>()
                .await
                .map(|t| t.models.iter().any(|m| m.name == cfg.model)),
            LlmProvider::OpenAI => resp
                .json::<OpenAiModels>()
                .await
                .map(|m| m.data.iter().any(|m| m.id == cfg.model)),
        };

        Ok(match listed {
            Ok(true) => HealthStatus::new(cfg, true, latency, "reachable; model is available"),
            Ok(false) => HealthStatus::new(cfg, false, latency, "reachable, but model is not listed"),
            Err(e) => HealthStatus::new(
                cfg,
                true,
                latency,
                format!("reachable; model listing could not be decoded: {e}"),
            ),
        })
    }
}

#[derive(Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaTag>,
}

#[derive(Deserialize)]
struct OllamaTag {
    name: String,
}

#[derive(Deserialize)]
struct OpenAiModels {
    data: Vec<OpenAiModel>,
}

#[derive(Deserialize)]
struct OpenAiModel {
    id: String,
}
