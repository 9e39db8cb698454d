//! Unified error type for the rag-base crate.

use thiserror::Error;

/// Errors produced by extraction, chunking, indexing and retrieval.
#[derive(Debug, Error)]
pub enum RagBaseError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Document input ───────────────────────────────────────────────────────
    /// The byte stream could not be opened as a PDF.
    #[error("document is unreadable: {0}")]
    DocumentUnreadable(String),

    /// The document produced no text to index.
    #[error("document contains no extractable text")]
    EmptyDocument,

    // ── Chunking ─────────────────────────────────────────────────────────────
    /// Chunk size is zero or the overlap does not leave room to advance.
    #[error("invalid chunk config: size={size}, overlap={overlap} (need size > 0 and overlap < size)")]
    InvalidChunkConfig { size: usize, overlap: usize },

    // ── Embeddings / index ───────────────────────────────────────────────────
    /// Embedding backend failed to produce vectors.
    #[error("embedding model '{model}' is unavailable: {reason}")]
    EmbeddingModelUnavailable { model: String, reason: String },

    /// A vector did not have the index dimension.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Retrieval was requested before an index was built.
    #[error("vector index has not been built")]
    IndexNotBuilt,
}

impl RagBaseError {
    /// Stable, machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            RagBaseError::EnvParse { .. } | RagBaseError::InvalidConfig(_) => "RAG_CONFIG_ERROR",
            RagBaseError::DocumentUnreadable(_) => "DOCUMENT_UNREADABLE",
            RagBaseError::EmptyDocument => "EMPTY_DOCUMENT",
            RagBaseError::InvalidChunkConfig { .. } => "INVALID_CHUNK_CONFIG",
            RagBaseError::EmbeddingModelUnavailable { .. } => "EMBEDDING_MODEL_UNAVAILABLE",
            RagBaseError::VectorSizeMismatch { .. } => "VECTOR_SIZE_MISMATCH",
            RagBaseError::IndexNotBuilt => "INDEX_NOT_BUILT",
        }
    }
}
