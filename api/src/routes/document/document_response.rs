use serde::Serialize;

/// Response body for `DELETE /document`.
#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub cleared: bool,
}
