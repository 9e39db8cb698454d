//! Completion and embedding client used by the contract assistant.
//!
//! - [`services::open_ai_service::OpenAiService`] talks to any OpenAI-compatible
//!   chat-completion endpoint (Groq by default).
//! - [`services::ollama_service::OllamaService`] talks to a local Ollama runtime,
//!   mostly for embeddings.
//! - [`service_profiles::LlmServiceProfiles`] bundles the `completion` and
//!   `embedding` profiles and caches HTTP clients.
//! - [`health_service::HealthService`] probes providers for a `/health` endpoint.
//! - [`telemetry`] exposes a library-scoped tracing layer.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, Result};
pub use service_profiles::LlmServiceProfiles;
