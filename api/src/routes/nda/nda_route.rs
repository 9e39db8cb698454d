use std::sync::Arc;

use axum::{Json, extract::State, response::Response};
use contextor::NdaRequest;
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
};

/// Handler: POST /nda
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/nda \
///   -H 'content-type: application/json' \
///   -d '{"discloser":"Acme","receiver":"Beta","purpose":"Evaluation","duration":"2 years"}'
/// ```
#[instrument(name = "nda_route", skip_all)]
pub async fn nda_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NdaRequest>,
) -> AppResult<Response> {
    let answer = state.assistant.draft_nda(&body).await?;
    info!(chars = answer.answer.chars().count(), "nda drafted");
    Ok(ok(answer))
}
