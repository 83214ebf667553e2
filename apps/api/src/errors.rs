use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractError;
use crate::generation::GenerationError;

/// Shown for every failed generation, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate resume. Please try again with more details.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The one-line message a user sees for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::Conflict(msg) => {
                msg.clone()
            }
            AppError::Extraction(e) => e.to_string(),
            AppError::Generation(_) => GENERATION_FAILED_MESSAGE.to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Extraction(ExtractError::FileRead(e)) => {
                tracing::warn!("File read error: {e}");
                (StatusCode::UNPROCESSABLE_ENTITY, "FILE_READ_ERROR")
            }
            AppError::Extraction(ExtractError::DocumentParse { extension, source }) => {
                tracing::warn!("Could not parse .{extension} upload: {source}");
                (StatusCode::UNPROCESSABLE_ENTITY, "DOCUMENT_PARSE_ERROR")
            }
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (StatusCode::BAD_GATEWAY, "GENERATION_ERROR")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.user_message()
            }
        }));

        (status, body).into_response()
    }
}
