//! POST /ask: answers a question about the uploaded contract with retrieved context.

use std::sync::Arc;

use axum::{Json, extract::State, response::Response};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
    routes::ask::ask_request::AskRequest,
};

/// Handler: POST /ask
///
/// The first question after an upload builds the vector index; later ones
/// reuse it.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"How long is the term?","top_k":3}'
/// ```
#[instrument(name = "ask_route", skip_all)]
pub async fn ask_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> AppResult<Response> {
    let mut session = state.session.lock().await;
    let answer = session.ask(&body.question, body.top_k).await?;
    info!(top_k = ?body.top_k, context = answer.context.len(), "question answered");
    Ok(ok(answer))
}
