//! Configuration layer: reads runtime settings from environment variables
//! and exposes strongly typed configs for embeddings, chunking, and search.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chunker::ChunkConfig;
use crate::errors::rag_base_error::RagBaseError;

/// Similarity function used to rank chunks against a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Dot,
    /// Negative euclidean distance, so that larger is still better.
    Euclid,
}

impl FromStr for DistanceMetric {
    type Err = RagBaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cosine" => Ok(DistanceMetric::Cosine),
            "dot" | "dotproduct" => Ok(DistanceMetric::Dot),
            "euclid" | "l2" => Ok(DistanceMetric::Euclid),
            _ => Err(RagBaseError::EnvParse {
                key: "RAG_DISTANCE".into(),
                value: s.to_string(),
            }),
        }
    }
}

/// Where chunk and query vectors come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingBackend {
    /// Remote model behind `ai-llm-service` (Ollama or OpenAI-compatible).
    Remote,
    /// Local feature-hashing embedder; no network.
    Hashing,
}

/// Embedding configuration (backend, dimension, and concurrency).
///
/// The remote model name lives in the `ai-llm-service` embedding profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    /// Embedding vector dimensionality (384 for all-minilm).
    pub dim: usize,
    /// Max concurrent embedding requests while building an index.
    pub concurrency: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Remote,
            dim: 384,
            concurrency: 4,
        }
    }
}

/// Search behavior knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default number of chunks returned per query.
    pub top_k: usize,
    /// Optional minimum score; hits below it are dropped.
    pub min_score: Option<f32>,
    pub distance: DistanceMetric,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            min_score: None,
            distance: DistanceMetric::Cosine,
        }
    }
}

/// Top-level runtime configuration for the RAG module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    pub embedding: EmbeddingConfig,
    pub chunk: ChunkConfig,
    pub search: SearchConfig,
}

impl RagConfig {
    /// Build configuration from environment variables.
    ///
    /// Environment variables used:
    /// - `EMBEDDING_PROVIDER` (`hashing` selects the local embedder; anything else is remote)
    /// - `EMBEDDING_DIM` (default: 384)
    /// - `EMBEDDING_CONCURRENCY` (default: 4)
    /// - `CHUNK_SIZE` (default: 500)
    /// - `CHUNK_OVERLAP` (default: 50)
    /// - `RAG_TOP_K` (default: 4)
    /// - `RAG_MIN_SCORE` (optional)
    /// - `RAG_DISTANCE` (values: "cosine" | "dot" | "euclid"; default: "cosine")
    pub fn from_env() -> Result<Self, RagBaseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RagConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RagBaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = RagConfig::default();

        let backend = match get("EMBEDDING_PROVIDER") {
            Some(p) if p.trim().eq_ignore_ascii_case("hashing") => EmbeddingBackend::Hashing,
            _ => EmbeddingBackend::Remote,
        };
        let embedding = EmbeddingConfig {
            backend,
            dim: parse_var(&get, "EMBEDDING_DIM")?.unwrap_or(defaults.embedding.dim),
            concurrency: parse_var(&get, "EMBEDDING_CONCURRENCY")?
                .unwrap_or(defaults.embedding.concurrency),
        };

        let chunk = ChunkConfig {
            size: parse_var(&get, "CHUNK_SIZE")?.unwrap_or(defaults.chunk.size),
            overlap: parse_var(&get, "CHUNK_OVERLAP")?.unwrap_or(defaults.chunk.overlap),
        };

        let search = SearchConfig {
            top_k: parse_var(&get, "RAG_TOP_K")?.unwrap_or(defaults.search.top_k),
            min_score: parse_var(&get, "RAG_MIN_SCORE")?,
            distance: match get("RAG_DISTANCE") {
                Some(v) => v.parse()?,
                None => DistanceMetric::Cosine,
            },
        };

        // Basic validations
        chunk.validate()?;
        if embedding.dim == 0 {
            return Err(RagBaseError::InvalidConfig(
                "EMBEDDING_DIM must be > 0".into(),
            ));
        }
        if embedding.concurrency == 0 {
            return Err(RagBaseError::InvalidConfig(
                "EMBEDDING_CONCURRENCY must be > 0".into(),
            ));
        }
        if search.top_k == 0 {
            return Err(RagBaseError::InvalidConfig("RAG_TOP_K must be > 0".into()));
        }

        Ok(Self {
            embedding,
            chunk,
            search,
        })
    }
}

/// Parse an optional value, mapping a bad value to `RagBaseError::EnvParse`.
fn parse_var<T, G>(get: &G, key: &str) -> Result<Option<T>, RagBaseError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| RagBaseError::EnvParse {
                key: key.into(),
                value: v,
            }),
        None => Ok(None),
    }
}
