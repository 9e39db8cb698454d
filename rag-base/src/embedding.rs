//! Embedding providers used to vectorize chunks and queries.
//!
//! Both chunks and the query of one index must go through the same provider,
//! otherwise scores are meaningless.

use std::{future::Future, pin::Pin, sync::Arc};

use ai_llm_service::LlmServiceProfiles;
use tracing::warn;

use crate::errors::rag_base_error::RagBaseError;

/// Boxed future returned by [`EmbeddingsProvider::embed`].
pub type EmbedFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<f32>, RagBaseError>> + Send + 'a>>;

/// Provider interface for embedding generation.
///
/// Async because real providers (Ollama, OpenAI-compatible) perform HTTP requests.
pub trait EmbeddingsProvider: Send + Sync {
    /// Name of the model the vectors come from.
    fn model_name(&self) -> &str;

    /// Embed a single text.
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a>;
}

/* ------------------------------------------------------------------------- */
/* Remote                                                                    */
/* ------------------------------------------------------------------------- */

/// Embedder backed by the `embedding` profile of [`LlmServiceProfiles`].
#[derive(Clone)]
pub struct LlmEmbedder {
    svc: Arc<LlmServiceProfiles>,
    model: String,
    /// Expected dimension; `None` accepts whatever the model returns.
    dim: Option<usize>,
}

impl LlmEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: Option<usize>) -> Self {
        let model = svc
            .profiles()
            .1
            .map(|p| p.model.clone())
            .unwrap_or_default();
        Self { svc, model, dim }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a> {
        Box::pin(async move {
            let v = self.svc.embed(text).await.map_err(|e| {
                warn!(model = %self.model, kind = e.kind(), error = %e, "embedding call failed");
                RagBaseError::EmbeddingModelUnavailable {
                    model: self.model.clone(),
                    reason: e.to_string(),
                }
            })?;

            if let Some(want) = self.dim {
                if v.len() != want {
                    return Err(RagBaseError::VectorSizeMismatch { got: v.len(), want });
                }
            }
            Ok(v)
        })
    }
}

/* ------------------------------------------------------------------------- */
/* Local hashing                                                             */
/* ------------------------------------------------------------------------- */

/// Deterministic bag-of-words embedder.
///
/// Each lowercase alphanumeric token is hashed with blake3 into one of `dim`
/// buckets with a hash-derived sign; the result is L2-normalized. Texts that
/// share words get positive cosine similarity, identical texts get 1.0.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
    name: String,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Result<Self, RagBaseError> {
        if dim == 0 {
            return Err(RagBaseError::InvalidConfig(
                "hashing embedder needs dim > 0".into(),
            ));
        }
        Ok(Self {
            dim,
            name: format!("hashing-{dim}"),
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Synchronous core of [`EmbeddingsProvider::embed`].
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        let lowered = text.to_lowercase();
        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let h = blake3::hash(token.as_bytes());
            let bytes = h.as_bytes();
            let mut idx = [0u8; 8];
            idx.copy_from_slice(&bytes[..8]);
            let bucket = (u64::from_le_bytes(idx) % self.dim as u64) as usize;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
            v[bucket] += sign;
        }

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl EmbeddingsProvider for HashingEmbedder {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a> {
        Box::pin(async move { Ok(self.vectorize(text)) })
    }
}
