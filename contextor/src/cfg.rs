//! Runtime configuration loaded from environment variables.

use rag_base::{RagBaseError, RagConfig};

use crate::prompt::DEFAULT_SYSTEM;

/// Config bag for a contract session.
#[derive(Clone, Debug)]
pub struct ContextorConfig {
    /// Chunking, embedding and search knobs.
    pub rag: RagConfig,
    /// System instruction for every completion (`LLM_SYSTEM_PROMPT`).
    pub system_prompt: String,
}

impl Default for ContextorConfig {
    fn default() -> Self {
        Self {
            rag: RagConfig::default(),
            system_prompt: DEFAULT_SYSTEM.to_string(),
        }
    }
}

impl ContextorConfig {
    /// Build from environment variables; see [`RagConfig::from_env`] for the RAG knobs.
    pub fn from_env() -> Result<Self, RagBaseError> {
        let system_prompt = std::env::var("LLM_SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM.to_string());

        Ok(Self {
            rag: RagConfig::from_env()?,
            system_prompt,
        })
    }
}
