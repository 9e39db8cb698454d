//! Data types returned by indexing and search.

use serde::{Deserialize, Serialize};

/// A single semantic search hit (ranked by similarity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub score: f32,
    /// Position of the chunk in document order.
    pub chunk_index: usize,
    /// Character offsets of the chunk in the extracted text.
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Summary statistics for an index build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub indexed: usize,
    pub dim: usize,
    pub model: String,
    pub duration_ms: u128,
}
