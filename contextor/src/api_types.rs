//! Public API types re-used by external crates (e.g., the HTTP API layer).

use rag_base::SearchHit;
use serde::{Deserialize, Serialize};

/// Form fields for an NDA draft. Every field must be non-blank.
///
/// # Example
/// ```
/// use contextor::NdaRequest;
/// let req = NdaRequest {
///     discloser: "Acme".into(),
///     receiver: "Beta".into(),
///     purpose: "Evaluation".into(),
///     duration: "2 years".into(),
/// };
/// assert_eq!(req.receiver, "Beta");
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NdaRequest {
    #[serde(default)]
    pub discloser: String,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub duration: String,
}

/// Which task produced an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    DraftNda,
    Summarize,
    ExplainClause,
    Ask,
}

/// A chunk that was placed into the prompt as context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsedChunk {
    pub score: f32,
    pub chunk_index: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl From<SearchHit> for UsedChunk {
    fn from(h: SearchHit) -> Self {
        Self {
            score: h.score,
            chunk_index: h.chunk_index,
            start: h.start,
            end: h.end,
            text: h.text,
        }
    }
}

/// Completion text together with the context fed to the model (QnA only).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskAnswer {
    pub task: Task,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<UsedChunk>,
}

/// What the session knows about the current document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub pages: usize,
    pub chars: usize,
    /// Number of indexed chunks, once the index has been built.
    pub indexed_chunks: Option<usize>,
}
