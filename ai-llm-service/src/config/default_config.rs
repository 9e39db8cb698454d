//! Default LLM configs loaded strictly from environment variables.
//!
//! Two roles are supported:
//!
//! - **Completion** → hosted chat-completion model answering the legal tasks
//! - **Embedding**  → embedding generator for per-document retrieval
//!
//! # Environment variables
//!
//! Completion:
//! - `LLM_API_KEY` (fallback `GROQ_API_KEY`) = bearer token (mandatory)
//! - `LLM_PROVIDER`     = `openai` | `groq` | `ollama` (default: `groq`)
//! - `LLM_ENDPOINT`     = base URL (default: [`DEFAULT_COMPLETION_ENDPOINT`])
//! - `LLM_MODEL`        = model id (default: [`DEFAULT_COMPLETION_MODEL`])
//! - `LLM_TEMPERATURE`  = sampling temperature (default: `0.5`)
//! - `LLM_MAX_TOKENS`   = response cap (default: `800`)
//! - `LLM_TIMEOUT_SECS` = request timeout (default: `60`)
//!
//! Embedding:
//! - `EMBEDDING_PROVIDER` = `ollama` | `openai` (default: `ollama`)
//! - `EMBEDDING_MODEL`    = model id (default: [`DEFAULT_EMBEDDING_MODEL`])
//! - `EMBEDDING_ENDPOINT` = base URL for `openai` embeddings (default: `LLM_ENDPOINT`)
//! - `OLLAMA_URL` or `OLLAMA_PORT` = Ollama endpoint (default: `http://localhost:11434`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt_f32, env_opt_u32, env_opt_u64, opt_env,
        validate_http_endpoint, validate_range_f32,
    },
};

/// Groq's OpenAI-compatible API base.
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.groq.com/openai";
/// Default hosted chat model.
pub const DEFAULT_COMPLETION_MODEL: &str = "llama3-8b-8192";
/// Default sampling temperature for legal drafting.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
/// Default response-length cap.
pub const DEFAULT_MAX_TOKENS: u32 = 800;
/// Default embedding model name (Ollama tag).
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";

const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

/// Resolves the Ollama endpoint from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. `http://localhost:11434`
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Some(url) = opt_env("OLLAMA_URL") {
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url);
    }
    if let Some(port) = opt_env("OLLAMA_PORT") {
        port.trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{}", port.trim()));
    }
    Ok(DEFAULT_OLLAMA_ENDPOINT.to_string())
}

/// Constructs the **completion** profile.
///
/// The API key is mandatory: a missing token is a startup error.
///
/// # Errors
/// - [`ConfigError::MissingVar`] if neither `LLM_API_KEY` nor `GROQ_API_KEY` is set
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::OutOfRange`] for bad knobs
/// - [`ConfigError::InvalidFormat`] if the endpoint is not http(s)
pub fn config_completion() -> Result<LlmModelConfig, AiLlmError> {
    let provider = match opt_env("LLM_PROVIDER") {
        Some(p) => p.parse::<LlmProvider>()?,
        None => LlmProvider::OpenAI,
    };

    let api_key = opt_env("LLM_API_KEY").or_else(|| opt_env("GROQ_API_KEY"));
    if api_key.is_none() && provider == LlmProvider::OpenAI {
        return Err(ConfigError::MissingVar("LLM_API_KEY or GROQ_API_KEY").into());
    }

    let endpoint = match provider {
        LlmProvider::OpenAI => {
            opt_env("LLM_ENDPOINT").unwrap_or_else(|| DEFAULT_COMPLETION_ENDPOINT.to_string())
        }
        LlmProvider::Ollama => match opt_env("LLM_ENDPOINT") {
            Some(url) => url,
            None => ollama_endpoint()?,
        },
    };
    validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;

    let model = opt_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string());
    let temperature = env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: Some(env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS)),
        temperature: Some(temperature),
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(60)),
    })
}

/// Constructs the **embedding** profile.
///
/// For `openai` embeddings the completion key and endpoint are reused unless
/// `EMBEDDING_ENDPOINT` overrides the base URL.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)`
pub fn config_embedding(completion: &LlmModelConfig) -> Result<LlmModelConfig, AiLlmError> {
    let provider = match opt_env("EMBEDDING_PROVIDER") {
        Some(p) => p.parse::<LlmProvider>()?,
        None => LlmProvider::Ollama,
    };

    let model = opt_env("EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    let (endpoint, api_key) = match provider {
        LlmProvider::Ollama => (ollama_endpoint()?, None),
        LlmProvider::OpenAI => (
            opt_env("EMBEDDING_ENDPOINT").unwrap_or_else(|| completion.endpoint.clone()),
            completion.api_key.clone(),
        ),
    };
    validate_http_endpoint("EMBEDDING_ENDPOINT", &endpoint)?;

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}
