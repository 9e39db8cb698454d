use std::sync::Arc;

use axum::{extract::State, response::Response};
use tracing::{info, instrument};

use crate::core::{app_state::AppState, http::response_envelope::ok};

/// Handler: GET /health
///
/// Probes the completion profile and, when configured, the remote embedding
/// profile. Always answers `200`; unhealthy providers carry `ok: false`.
#[instrument(name = "health_route", skip(state))]
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let statuses = state.llm.health_all().await;
    let healthy = statuses.iter().filter(|s| s.ok).count();
    info!(healthy, total = statuses.len(), "health probed");
    ok(statuses)
}
