use std::sync::Arc;

use axum::{extract::State, response::Response};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
};

/// Handler: POST /summarize
#[instrument(name = "summarize_route", skip_all)]
pub async fn summarize_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let session = state.session.lock().await;
    let answer = session.summarize().await?;
    info!(chars = answer.answer.chars().count(), "document summarized");
    Ok(ok(answer))
}
