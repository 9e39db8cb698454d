//! `/document`: upload, inspect and clear the contract held by the session.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, response::Response};
use contextor::ContextorError;
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
    routes::document::document_response::ClearedResponse,
};

/// Handler: PUT /document
///
/// The body is the raw PDF. A failed upload leaves the previous document in
/// place.
///
/// # Example
/// ```bash
/// curl -X PUT http://127.0.0.1:8080/document \
///   -H 'content-type: application/pdf' --data-binary @contract.pdf
/// ```
#[instrument(name = "upload_document_route", skip_all, fields(bytes = body.len()))]
pub async fn upload_document_route(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Response> {
    let mut session = state.session.lock().await;
    let info = session.load_pdf(&body)?;
    info!(pages = info.pages, chars = info.chars, "document loaded");
    Ok(ok(info))
}

/// Handler: GET /document
#[instrument(name = "document_info_route", skip_all)]
pub async fn document_info_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let session = state.session.lock().await;
    let info = session.document_info().ok_or(ContextorError::NoDocument)?;
    Ok(ok(info))
}

/// Handler: DELETE /document
#[instrument(name = "clear_document_route", skip_all)]
pub async fn clear_document_route(State(state): State<Arc<AppState>>) -> Response {
    state.session.lock().await.reset();
    info!("document cleared");
    ok(ClearedResponse { cleared: true })
}
