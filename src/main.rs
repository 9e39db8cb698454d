use std::{error::Error, sync::Arc};

use ai_llm_service::{
    LlmServiceProfiles,
    config::default_config::{config_completion, config_embedding},
    telemetry,
};
use api::{ApiConfig, AppState};
use contextor::{ContextorConfig, ContractSession};
use rag_base::{EmbeddingBackend, embedder_from_config};
use tracing::{Level, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; the process environment still applies.
    let dotenv = dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(telemetry::layer())
        .init();

    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded .env");
    }

    if let Err(e) = run().await {
        error!(error = %e, "contract-genie failed");
        return Err(e);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn Error>> {
    let session_cfg = ContextorConfig::from_env()?;

    let completion = config_completion()?;
    // The hashing embedder runs in-process; only a remote backend needs a profile.
    let embedding = match session_cfg.rag.embedding.backend {
        EmbeddingBackend::Remote => Some(config_embedding(&completion)?),
        EmbeddingBackend::Hashing => None,
    };
    info!(
        provider = ?completion.provider,
        model = %completion.model,
        embedding = ?session_cfg.rag.embedding.backend,
        "llm profiles configured"
    );
    let llm = Arc::new(LlmServiceProfiles::new(completion, embedding, None)?);

    let embedder = embedder_from_config(&session_cfg.rag, llm.clone())?;
    let session = ContractSession::new(session_cfg, llm.clone(), embedder);

    let api_cfg = ApiConfig::from_env()?;
    let state = AppState::new(session, llm, &api_cfg);

    api::start(state, &api_cfg).await?;
    Ok(())
}
