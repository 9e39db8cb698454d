use std::sync::Arc;

use axum::{Json, extract::State, response::Response};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
    routes::explain::explain_request::ExplainRequest,
};

/// Handler: POST /explain
#[instrument(name = "explain_route", skip_all)]
pub async fn explain_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExplainRequest>,
) -> AppResult<Response> {
    let answer = state.assistant.explain_clause(&body.clause).await?;
    info!("clause explained");
    Ok(ok(answer))
}
