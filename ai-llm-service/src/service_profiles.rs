//! Shared LLM service with two profiles: `completion` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout).
//! - The embedding profile is optional: deployments that embed locally
//!   only need the completion profile.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{LlmModelConfig, LlmProvider, LlmServiceProfiles};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ai_llm_service::AiLlmError> {
//!     let completion = LlmModelConfig {
//!         provider: LlmProvider::OpenAI,
//!         model: "llama3-8b-8192".into(),
//!         endpoint: "https://api.groq.com/openai".into(),
//!         api_key: Some("gsk_...".into()),
//!         max_tokens: Some(800),
//!         temperature: Some(0.5),
//!         top_p: None,
//!         timeout_secs: Some(60),
//!     };
//!
//!     let svc = Arc::new(LlmServiceProfiles::new(completion, None, Some(10))?);
//!
//!     let txt = svc
//!         .complete("Explain: The term is 12 months.", Some("You are a helpful legal assistant."))
//!         .await?;
//!     println!("{txt}");
//!
//!     for status in svc.health_all().await {
//!         println!("{} ok={}", status.endpoint, status.ok);
//!     }
//!     Ok(())
//! }
//! ```

use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    sync::Arc,
};

use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError},
    health_service::{HealthService, HealthStatus},
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// Shared service managing the **completion** and optional **embedding** profiles.
///
/// Internally, it caches Ollama/OpenAI clients keyed by their configuration to
/// avoid recreating HTTP clients on each call.
pub struct LlmServiceProfiles {
    completion: LlmModelConfig,
    embedding: Option<LlmModelConfig>,

    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,
    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,

    health: HealthService,
}

impl LlmServiceProfiles {
    /// Creates a new service.
    ///
    /// - `completion`: required chat-completion profile.
    /// - `embedding`: optional embedding profile.
    /// - `health_timeout_secs`: optional timeout for the health checker.
    ///
    /// The completion client is built eagerly so that a broken profile
    /// (missing key, bad endpoint) fails at startup rather than on first use.
    pub fn new(
        completion: LlmModelConfig,
        embedding: Option<LlmModelConfig>,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, AiLlmError> {
        let svc = Self {
            completion,
            embedding,
            ollama: RwLock::new(HashMap::new()),
            openai: RwLock::new(HashMap::new()),
            health: HealthService::new(health_timeout_secs)?,
        };
        svc.validate(&svc.completion)?;
        if let Some(emb) = &svc.embedding {
            svc.validate(emb)?;
        }
        Ok(svc)
    }

    /// Sends one prompt to the **completion** profile and returns the trimmed answer.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the request fails; see [`AiLlmError::kind`].
    pub async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        match self.completion.provider {
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.completion).await?;
                cli.generate(prompt, system).await
            }
            LlmProvider::OpenAI => {
                let cli = self.get_or_init_openai(&self.completion).await?;
                cli.generate(prompt, system).await
            }
        }
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if no embedding profile is configured
    /// - any provider error from the embedding call
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let cfg = self.embedding.as_ref().ok_or(ConfigError::InvalidFormat {
            var: "EMBEDDING_PROVIDER",
            reason: "no remote embedding profile is configured",
        })?;
        match cfg.provider {
            LlmProvider::Ollama => self.get_or_init_ollama(cfg).await?.embeddings(input).await,
            LlmProvider::OpenAI => self.get_or_init_openai(cfg).await?.embeddings(input).await,
        }
    }

    /// Returns a health snapshot for all distinct profiles. Never fails.
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        let mut list = Vec::<LlmModelConfig>::with_capacity(2);
        list.push(self.completion.clone());
        if let Some(emb) = &self.embedding {
            if *emb != self.completion {
                list.push(emb.clone());
            }
        }
        self.health.check_many(&list).await
    }

    /// Returns references to the current profiles `(completion, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, Option<&LlmModelConfig>) {
        (&self.completion, self.embedding.as_ref())
    }

    /* --------------------- Internals --------------------- */

    fn validate(&self, cfg: &LlmModelConfig) -> Result<(), AiLlmError> {
        match cfg.provider {
            LlmProvider::Ollama => OllamaService::new(cfg.clone()).map(|_| ()),
            LlmProvider::OpenAI => OpenAiService::new(cfg.clone()).map(|_| ()),
        }
    }

    async fn get_or_init_ollama(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OllamaService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.ollama.write().await;
        if let Some(cli) = w.get(&key) {
            return Ok(cli.clone());
        }
        debug!(model = %cfg.model, "creating Ollama client");
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }

    async fn get_or_init_openai(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OpenAiService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.openai.write().await;
        if let Some(cli) = w.get(&key) {
            return Ok(cli.clone());
        }
        debug!(model = %cfg.model, "creating OpenAI-compatible client");
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }
}

/// Internal cache key to identify unique client configs.
#[derive(Clone, Eq)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

impl PartialEq for ClientKey {
    fn eq(&self, other: &Self) -> bool {
        self.provider == other.provider
            && self.endpoint == other.endpoint
            && self.model == other.model
            && self.api_key == other.api_key
            && self.timeout == other.timeout
    }
}

impl Hash for ClientKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.provider.hash(state);
        self.endpoint.hash(state);
        self.model.hash(state);
        self.api_key.hash(state);
        self.timeout.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groq() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: "llama3-8b-8192".into(),
            endpoint: "https://api.groq.com/openai".into(),
            api_key: Some("k".into()),
            max_tokens: Some(800),
            temperature: Some(0.5),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn broken_completion_profile_fails_at_construction() {
        let mut cfg = groq();
        cfg.api_key = None;
        let err = LlmServiceProfiles::new(cfg, None, Some(1)).err().unwrap();
        assert_eq!(err.kind(), "MISSING_API_KEY");
    }

    #[tokio::test]
    async fn embed_without_profile_is_a_config_error() {
        let svc = LlmServiceProfiles::new(groq(), None, Some(1)).unwrap();
        let err = svc.embed("text").await.unwrap_err();
        assert_eq!(err.kind(), "CONFIG_ERROR");
        assert!(svc.profiles().1.is_none());
    }

    #[tokio::test]
    async fn clients_are_cached_per_config() {
        let svc = LlmServiceProfiles::new(groq(), None, Some(1)).unwrap();
        let a = svc.get_or_init_openai(&groq()).await.unwrap();
        let b = svc.get_or_init_openai(&groq()).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
