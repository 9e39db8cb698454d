use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use contextor::{Assistant, ContractSession};
use thiserror::Error;
use tokio::sync::Mutex;

/// Default listen address when `API_ADDRESS` is unset.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";
/// Default cap for `PUT /document` bodies (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Server settings read from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `API_ADDRESS`, e.g. `127.0.0.1:8080`.
    pub address: String,
    /// `MAX_UPLOAD_BYTES`.
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let address = std::env::var("API_ADDRESS")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(v) if !v.trim().is_empty() => {
                v.trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidValue {
                        var: "MAX_UPLOAD_BYTES",
                        value: v.clone(),
                    })?
            }
            _ => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            address,
            max_upload_bytes,
        })
    }
}

/// Shared state for all HTTP handlers.
///
/// There is exactly one contract session per process; the mutex serializes
/// document actions on it. Document-free tasks go through `assistant` and
/// never take the lock.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<ContractSession>>,
    pub assistant: Assistant,
    /// Completion/embedding profiles, used by `/health`.
    pub llm: Arc<LlmServiceProfiles>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(session: ContractSession, llm: Arc<LlmServiceProfiles>, cfg: &ApiConfig) -> Self {
        Self {
            assistant: session.assistant().clone(),
            session: Arc::new(Mutex::new(session)),
            llm,
            max_upload_bytes: cfg.max_upload_bytes,
        }
    }
}
