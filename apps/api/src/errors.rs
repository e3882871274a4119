use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::validator::ValidationReport;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Auth-action outcomes (user already exists, user not found on sign-in) are
/// NOT errors — those are rendered as `{success, message}` values by the auth
/// handlers and never pass through here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(ValidationReport),

    #[error("Generation error: {0}")]
    Llm(#[from] LlmError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "error": msg })),
            )
                .into_response(),
            // The field-level report goes back to the client verbatim.
            AppError::Validation(report) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": report })),
            )
                .into_response(),
            AppError::Llm(e) => {
                tracing::error!("Generation provider error: {e}");
                internal_error(e.to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                internal_error(e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                internal_error(e.to_string())
            }
        }
    }
}

fn internal_error(details: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "Internal Server Error",
            "details": details,
        })),
    )
        .into_response()
}
