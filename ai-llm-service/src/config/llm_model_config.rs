use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// One value describes one logical profile (completion or embedding). It is
/// built once at startup and handed to the services by reference or clone;
/// nothing in this crate reads the API key from ambient state afterwards.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenAI,
///     model: "llama3-8b-8192".to_string(),
///     endpoint: "https://api.groq.com/openai".to_string(),
///     api_key: Some("gsk-...".to_string()),
///     max_tokens: Some(800),
///     temperature: Some(0.5),
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.max_tokens, Some(800));
/// ```
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"llama3-8b-8192"`, `"all-minilm"`).
    pub model: String,

    /// Base URL of the API, without the `/v1/...` or `/api/...` suffix.
    pub endpoint: String,

    /// Bearer token for providers that require authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
