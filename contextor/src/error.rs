//! Typed error for the contextor crate.

use ai_llm_service::AiLlmError;
use rag_base::RagBaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// A required input was blank; carries the field name.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An input was present but out of range.
    #[error("invalid field {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    /// The task needs an uploaded document and there is none.
    #[error("no document has been uploaded")]
    NoDocument,

    /// Errors from extraction, chunking, indexing or retrieval.
    #[error("RAG error: {0}")]
    Rag(#[from] RagBaseError),

    /// The completion endpoint failed.
    #[error("completion failed: {0}")]
    Completion(#[from] AiLlmError),
}

impl ContextorError {
    /// Stable, machine-readable code, delegating to the wrapped error.
    pub fn code(&self) -> &'static str {
        match self {
            ContextorError::MissingField(_) => "MISSING_FIELD",
            ContextorError::InvalidField { .. } => "INVALID_FIELD",
            ContextorError::NoDocument => "NO_DOCUMENT",
            ContextorError::Rag(e) => e.code(),
            ContextorError::Completion(e) => e.kind(),
        }
    }
}
