//! HTTP adapter: one contract session behind a small JSON API.

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{info, warn};

pub use crate::core::app_state::{ApiConfig, AppState};
pub use crate::error_handler::{AppError, AppResult};

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        ask::ask_route::ask_route,
        document::document_route::{
            clear_document_route, document_info_route, upload_document_route,
        },
        explain::explain_route::explain_route,
        health::health_route::health_route,
        nda::nda_route::nda_route,
        summarize::summarize_route::summarize_route,
    },
};

/// Builds the router with all routes, the upload limit and the rejection mapper.
pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health_route))
        .route("/nda", post(nda_route))
        .route("/explain", post(explain_route))
        .route(
            "/document",
            get(document_info_route)
                .put(upload_document_route)
                .delete(clear_document_route),
        )
        .route("/summarize", post(summarize_route))
        .route("/ask", post(ask_route))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(Arc::new(state))
}

/// Binds `cfg.address` and serves until Ctrl+C.
pub async fn start(state: AppState, cfg: &ApiConfig) -> Result<(), AppError> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.address)
        .await
        .map_err(|source| AppError::Bind {
            addr: cfg.address.clone(),
            source,
        })?;
    info!(address = %cfg.address, max_upload_bytes = cfg.max_upload_bytes, "api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("api stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
