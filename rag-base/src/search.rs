//! Retrieval: embed the query and rank indexed chunks by similarity.

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::embedding::EmbeddingsProvider;
use crate::errors::rag_base_error::RagBaseError;
use crate::index::VectorIndex;
use crate::structs::rag_base_config::DistanceMetric;
use crate::structs::rag_store::SearchHit;

/// Similarity of `a` and `b` under `metric`; larger means closer.
///
/// Cosine of a zero vector is `0.0`.
pub fn similarity(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    match metric {
        DistanceMetric::Dot => dot,
        DistanceMetric::Cosine => {
            let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            if na == 0.0 || nb == 0.0 {
                0.0
            } else {
                dot / (na * nb)
            }
        }
        DistanceMetric::Euclid => -a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt(),
    }
}

/// Rank every entry of `index` against `query_vec` and keep the best `k`.
///
/// Order is descending score; equal scores keep document order.
pub fn top_k(
    index: &VectorIndex,
    query_vec: &[f32],
    k: usize,
    min_score: Option<f32>,
) -> Result<Vec<SearchHit>, RagBaseError> {
    if query_vec.len() != index.dim() {
        return Err(RagBaseError::VectorSizeMismatch {
            got: query_vec.len(),
            want: index.dim(),
        });
    }

    let mut hits: Vec<SearchHit> = index
        .entries()
        .iter()
        .map(|(chunk, v)| SearchHit {
            score: similarity(index.distance(), query_vec, v),
            chunk_index: chunk.index,
            start: chunk.start,
            end: chunk.end,
            text: chunk.text.clone(),
        })
        .filter(|h| min_score.is_none_or(|m| h.score >= m))
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.chunk_index.cmp(&b.chunk_index))
    });
    hits.truncate(k);
    Ok(hits)
}

/// Embed `query` with `provider` and return the top `k` chunks of `index`.
///
/// # Errors
/// - [`RagBaseError::IndexNotBuilt`] if `index` is `None`
/// - [`RagBaseError::InvalidConfig`] if `k == 0`
/// - embedding errors from `provider`
pub async fn retrieve(
    index: Option<&VectorIndex>,
    query: &str,
    provider: &dyn EmbeddingsProvider,
    k: usize,
    min_score: Option<f32>,
) -> Result<Vec<SearchHit>, RagBaseError> {
    let index = index.ok_or(RagBaseError::IndexNotBuilt)?;
    if k == 0 {
        return Err(RagBaseError::InvalidConfig("top_k must be > 0".into()));
    }

    debug!(query_len = query.len(), k, indexed = index.len(), "retrieve: embedding query");
    let qv = provider.embed(query).await?;
    let hits = top_k(index, &qv, k, min_score)?;

    info!(
        hits = hits.len(),
        best = hits.first().map(|h| h.score).unwrap_or(0.0),
        "retrieve: done"
    );
    Ok(hits)
}
