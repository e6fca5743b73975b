//! Error handling for the application
//!
//! Business-rule violations are expected outcomes and travel as data: the
//! response body always carries one of the fixed `error_code` strings so any
//! client can map it to localized copy. Collaborator failures (database,
//! holiday lookup) are indeterminate - the booking is neither approved nor
//! rejected and the client should retry.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::engine::models::{EngineError, RuleCode, RuleViolation};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Rule(RuleViolation),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Rule(violation) => AppError::Rule(violation),
            EngineError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
        }
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &str) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            // 409 is reserved for overbooking conflicts specifically.
            AppError::Rule(v) if v.code == RuleCode::OverbookingNotAllowed => {
                (StatusCode::CONFLICT, v.code.as_str())
            }
            AppError::Rule(v) => (StatusCode::BAD_REQUEST, v.code.as_str()),
            AppError::InvalidArgument(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_ARGUMENT")
            }
            // The verdict is indeterminate, not a rejection: 503 so the
            // client retries instead of treating the dates as taken.
            AppError::Database(_) => (StatusCode::SERVICE_UNAVAILABLE, "INDETERMINATE"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let code = code.to_string();

        let message = match &self {
            AppError::Rule(v) => v.message.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "El servicio no está disponible en este momento. Intenta de nuevo.".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Error interno".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error_code": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
