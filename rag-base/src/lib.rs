//! Per-document retrieval primitives.
//!
//! Public API:
//! - [`extract::extract_pdf_text`]: PDF bytes → page texts.
//! - [`chunker::chunk_text`]: text → overlapping character chunks.
//! - [`index::IndexBuilder`]: chunks → in-memory [`index::VectorIndex`].
//! - [`search::retrieve`]: query → top-k chunks.
//! - [`index_document`]: chunk + embed in one call.

pub mod chunker;
pub mod embedding;
pub mod errors;
pub mod extract;
pub mod index;
pub mod search;
pub mod structs;

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use tracing::info;

pub use chunker::{Chunk, ChunkConfig};
pub use embedding::{EmbeddingsProvider, HashingEmbedder, LlmEmbedder};
pub use errors::rag_base_error::RagBaseError;
pub use extract::ExtractedText;
pub use index::{IndexBuilder, VectorIndex};
pub use structs::rag_base_config::{DistanceMetric, EmbeddingBackend, RagConfig};
pub use structs::rag_store::{IndexStats, SearchHit};

/// Chunk `text` and embed every chunk into a fresh index.
///
/// # Errors
/// - [`RagBaseError::EmptyDocument`] if `text` is blank
/// - chunking and embedding errors
pub async fn index_document(
    text: &str,
    cfg: &RagConfig,
    provider: &dyn EmbeddingsProvider,
) -> Result<(VectorIndex, IndexStats), RagBaseError> {
    if text.trim().is_empty() {
        return Err(RagBaseError::EmptyDocument);
    }
    let chunks = chunker::chunk_text(text, &cfg.chunk)?;
    info!(
        target: "rag_base::index",
        chunks = chunks.len(),
        "index_document: start"
    );
    IndexBuilder::new(cfg.embedding.concurrency, cfg.search.distance)
        .build(chunks, provider)
        .await
}

/// The embedder selected by `cfg.embedding.backend`.
///
/// # Errors
/// [`RagBaseError::InvalidConfig`] if the hashing dimension is zero.
pub fn embedder_from_config(
    cfg: &RagConfig,
    svc: Arc<LlmServiceProfiles>,
) -> Result<Arc<dyn EmbeddingsProvider>, RagBaseError> {
    Ok(match cfg.embedding.backend {
        EmbeddingBackend::Hashing => Arc::new(HashingEmbedder::new(cfg.embedding.dim)?),
        EmbeddingBackend::Remote => Arc::new(LlmEmbedder::new(svc, Some(cfg.embedding.dim))),
    })
}
