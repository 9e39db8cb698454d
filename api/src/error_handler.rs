use ai_llm_service::AiLlmError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contextor::ContextorError;
use rag_base::RagBaseError;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::app_state::ConfigError;
use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid field {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) | AppError::InvalidField { .. } => StatusCode::BAD_REQUEST,
            AppError::Http { status, .. } => *status,
            AppError::Config(_) | AppError::Bind { .. } | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::MissingField(_) => "MISSING_FIELD",
            AppError::InvalidField { .. } => "INVALID_FIELD",
            AppError::Http { code, .. } => code,
        }
    }

    fn http(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        AppError::Http {
            status,
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "request failed");
        } else {
            warn!(code = self.error_code(), error = %self, "request rejected");
        }

        let details = match &self {
            AppError::MissingField(field) => {
                vec![ApiErrorDetail::field(*field, "must be a non-empty string")]
            }
            AppError::InvalidField { field, reason } => {
                vec![ApiErrorDetail::field(*field, *reason)]
            }
            _ => Vec::new(),
        };
        ApiResponse::<()>::error(self.error_code(), self.to_string(), details)
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<RagBaseError> for AppError {
    fn from(err: RagBaseError) -> Self {
        let status = match &err {
            RagBaseError::DocumentUnreadable(_) | RagBaseError::EmptyDocument => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            RagBaseError::IndexNotBuilt => StatusCode::CONFLICT,
            RagBaseError::EmbeddingModelUnavailable { .. } => StatusCode::BAD_GATEWAY,
            RagBaseError::InvalidChunkConfig { .. }
            | RagBaseError::VectorSizeMismatch { .. }
            | RagBaseError::InvalidConfig(_)
            | RagBaseError::EnvParse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError::http(status, err.code(), err.to_string())
    }
}

/// The message is the human-readable rendering including the upstream body.
impl From<AiLlmError> for AppError {
    fn from(err: AiLlmError) -> Self {
        let status = match &err {
            AiLlmError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AiLlmError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        };
        AppError::http(status, err.kind(), err.user_message())
    }
}

impl From<ContextorError> for AppError {
    fn from(err: ContextorError) -> Self {
        match err {
            ContextorError::MissingField(field) => AppError::MissingField(field),
            ContextorError::InvalidField { field, reason } => {
                AppError::InvalidField { field, reason }
            }
            ContextorError::NoDocument => AppError::http(
                StatusCode::CONFLICT,
                "NO_DOCUMENT",
                "Upload a contract PDF first (PUT /document).",
            ),
            ContextorError::Rag(e) => e.into(),
            ContextorError::Completion(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::error_handler::{HttpError, Provider, ProviderError, ProviderErrorKind};

    use super::*;

    #[test]
    fn contextor_errors_map_to_statuses() {
        let e = AppError::from(ContextorError::MissingField("receiver"));
        assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(e.error_code(), "MISSING_FIELD");

        let e = AppError::from(ContextorError::NoDocument);
        assert_eq!(e.status_code(), StatusCode::CONFLICT);

        let e = AppError::from(ContextorError::Rag(RagBaseError::DocumentUnreadable(
            "bad header".into(),
        )));
        assert_eq!(e.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(e.error_code(), "DOCUMENT_UNREADABLE");
    }

    #[test]
    fn upstream_status_becomes_bad_gateway_with_body() {
        let llm = AiLlmError::from(ProviderError::new(
            Provider::OpenAI,
            ProviderErrorKind::HttpStatus(HttpError {
                status: StatusCode::TOO_MANY_REQUESTS,
                url: "https://api.groq.com/openai/v1/chat/completions".into(),
                snippet: "rate limited".into(),
            }),
        ));
        let e = AppError::from(ContextorError::Completion(llm));
        assert_eq!(e.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(e.error_code(), "COMPLETION_HTTP_STATUS");
        assert!(e.to_string().ends_with("Response: rate limited"));
    }

    #[test]
    fn completion_timeout_becomes_gateway_timeout() {
        let llm = AiLlmError::Timeout(std::time::Duration::from_secs(1));
        let e = AppError::from(ContextorError::Completion(llm));
        assert_eq!(e.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(e.error_code(), "COMPLETION_TIMEOUT");
    }
}
