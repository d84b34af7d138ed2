use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use atelier_ai::AiError;
use atelier_core::error::CoreError;
use atelier_sync::SyncError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain and sync errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `atelier_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A synchronization error from `atelier_sync`.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// A text-generation error from `atelier_ai`.
    #[error(transparent)]
    Ai(#[from] AiError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A disabled optional feature was requested.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::Sync(sync) => match sync {
                SyncError::Core(core) => classify_core_error(core),
                SyncError::Store(err) => {
                    tracing::error!(error = %err, "Content store error");
                    (
                        StatusCode::BAD_GATEWAY,
                        "STORE_ERROR",
                        "The content store rejected the operation".to_string(),
                    )
                }
            },

            AppError::Ai(err) => {
                tracing::error!(error = %err, "Text generation error");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    "Text generation failed".to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),

            AppError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", msg.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
