use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// `OpenAI` covers every endpoint that speaks the OpenAI REST dialect
/// (`/v1/chat/completions`, `/v1/embeddings`, `/v1/models`), including Groq.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// let provider: LlmProvider = "groq".parse().unwrap();
/// assert_eq!(provider, LlmProvider::OpenAI);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI-compatible hosted API (OpenAI, Groq, ...).
    OpenAI,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama),
            "openai" | "groq" | "chatgpt" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
