//! In-memory vector index for a single document.

use std::time::Instant;

use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info};

use crate::chunker::Chunk;
use crate::embedding::{EmbedFuture, EmbeddingsProvider};
use crate::errors::rag_base_error::RagBaseError;
use crate::structs::rag_base_config::DistanceMetric;
use crate::structs::rag_store::IndexStats;

/// Chunks of one document paired with their vectors.
///
/// Every vector has length [`VectorIndex::dim`] and came from the model named
/// by [`VectorIndex::model`].
#[derive(Debug, Clone)]
pub struct VectorIndex {
    entries: Vec<(Chunk, Vec<f32>)>,
    model: String,
    dim: usize,
    distance: DistanceMetric,
}

impl VectorIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn distance(&self) -> DistanceMetric {
        self.distance
    }

    pub fn entries(&self) -> &[(Chunk, Vec<f32>)] {
        &self.entries
    }
}

/// Embeds chunks and assembles a [`VectorIndex`].
#[derive(Debug, Clone, Copy)]
pub struct IndexBuilder {
    concurrency: usize,
    distance: DistanceMetric,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self {
            concurrency: 4,
            distance: DistanceMetric::Cosine,
        }
    }
}

impl IndexBuilder {
    pub fn new(concurrency: usize, distance: DistanceMetric) -> Self {
        Self {
            concurrency: concurrency.max(1),
            distance,
        }
    }

    /// Embed every chunk and build the index. Up to `concurrency` embedding
    /// requests run at once; vectors keep chunk order.
    ///
    /// # Errors
    /// - [`RagBaseError::EmptyDocument`] if `chunks` is empty
    /// - [`RagBaseError::EmbeddingModelUnavailable`] if the provider fails or returns empty vectors
    /// - [`RagBaseError::VectorSizeMismatch`] if vectors disagree on dimension
    pub async fn build(
        &self,
        chunks: Vec<Chunk>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<(VectorIndex, IndexStats), RagBaseError> {
        if chunks.is_empty() {
            return Err(RagBaseError::EmptyDocument);
        }
        let started = Instant::now();
        debug!(
            chunks = chunks.len(),
            model = provider.model_name(),
            concurrency = self.concurrency,
            "embedding chunks"
        );

        let pending: Vec<EmbedFuture<'_>> =
            chunks.iter().map(|c| provider.embed(&c.text)).collect();
        let vectors: Vec<Vec<f32>> = stream::iter(pending)
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let dim = vectors.first().map(Vec::len).unwrap_or(0);
        if dim == 0 {
            return Err(RagBaseError::EmbeddingModelUnavailable {
                model: provider.model_name().to_string(),
                reason: "provider returned an empty vector".into(),
            });
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != dim) {
            return Err(RagBaseError::VectorSizeMismatch {
                got: bad.len(),
                want: dim,
            });
        }

        let index = VectorIndex {
            entries: chunks.into_iter().zip(vectors).collect(),
            model: provider.model_name().to_string(),
            dim,
            distance: self.distance,
        };
        let stats = IndexStats {
            indexed: index.len(),
            dim,
            model: index.model.clone(),
            duration_ms: started.elapsed().as_millis(),
        };
        info!(
            indexed = stats.indexed,
            dim = stats.dim,
            model = %stats.model,
            duration_ms = stats.duration_ms,
            "vector index built"
        );
        Ok((index, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{EmbedFuture, HashingEmbedder};

    fn chunk(index: usize, text: &str) -> Chunk {
        Chunk {
            index,
            start: index * 10,
            end: index * 10 + text.chars().count(),
            text: text.to_string(),
        }
    }

    /// Returns a vector whose length is the text length, to provoke mismatches.
    struct RaggedEmbedder;

    impl EmbeddingsProvider for RaggedEmbedder {
        fn model_name(&self) -> &str {
            "ragged"
        }

        fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a> {
            Box::pin(async move { Ok(vec![1.0; text.len()]) })
        }
    }

    #[tokio::test]
    async fn keeps_chunk_order_and_dimension() {
        let e = HashingEmbedder::new(64).unwrap();
        let chunks: Vec<Chunk> = (0..10).map(|i| chunk(i, &format!("clause {i}"))).collect();
        let (index, stats) = IndexBuilder::new(3, DistanceMetric::Cosine)
            .build(chunks, &e)
            .await
            .unwrap();

        assert_eq!(stats.indexed, 10);
        assert_eq!(index.dim(), 64);
        assert_eq!(index.model(), "hashing-64");
        for (i, (c, v)) in index.entries().iter().enumerate() {
            assert_eq!(c.index, i);
            assert_eq!(v, &e.vectorize(&c.text));
        }
    }

    #[tokio::test]
    async fn empty_input_is_empty_document() {
        let e = HashingEmbedder::new(8).unwrap();
        let err = IndexBuilder::default().build(vec![], &e).await.unwrap_err();
        assert!(matches!(err, RagBaseError::EmptyDocument));
    }

    #[tokio::test]
    async fn dimension_mismatch_is_reported() {
        let chunks = vec![chunk(0, "abcd"), chunk(1, "ab")];
        let err = IndexBuilder::default()
            .build(chunks, &RaggedEmbedder)
            .await
            .unwrap_err();
        assert!(matches!(err, RagBaseError::VectorSizeMismatch { got: 2, want: 4 }));
    }
}
