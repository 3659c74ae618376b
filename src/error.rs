// src/error.rs
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::services::renderer::RenderError;

/// Application-level error type for the HTTP handlers.
///
/// A renderer exiting non-zero is *not* an error here: that outcome is a
/// regular `GenerateResponse::Error` carrying the captured output.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Empty, missing or unreadable prompt.
    #[error("No prompt provided")]
    NoPrompt,

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Request body refused before a prompt could be read (content type, size).
    #[error(transparent)]
    Rejected(#[from] axum::extract::rejection::JsonRejection),

    /// The render task panicked or was aborted.
    #[error("render task failed: {0}")]
    Task(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        AppError::Io { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NoPrompt => StatusCode::BAD_REQUEST,
            AppError::Rejected(rejection) => rejection.status(),
            AppError::Io { .. } | AppError::Render(_) | AppError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::NoPrompt => json!({ "error": self.to_string() }),
            AppError::Rejected(rejection) => json!({ "error": rejection.body_text() }),
            other => {
                tracing::error!(error = %other, "Internal error");
                json!({
                    "status": "error",
                    "error": "An internal error occurred",
                })
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
