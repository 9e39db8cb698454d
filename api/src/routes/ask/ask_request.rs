use serde::Deserialize;

/// Request payload for /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question about the uploaded contract.
    #[serde(default)]
    pub question: String,
    /// Optional override for the number of retrieved chunks.
    #[serde(default)]
    pub top_k: Option<usize>,
}
