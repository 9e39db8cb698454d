use serde::Deserialize;

/// Request payload for /explain.
#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    /// Clause text to explain in plain language.
    #[serde(default)]
    pub clause: String,
}
