// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
///
/// The domain variants (InvalidTransition, FeedbackNotAllowed, ...) are all
/// local, synchronous, recoverable failures surfaced to the caller; none is
/// fatal to the process.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    AuthError(String),

    // 403 Forbidden (authenticated, but not the expected actor)
    Forbidden(String),

    // 404 Not Found (referenced entity id absent)
    NotFound(String),

    // 409 Conflict (sign-up email collision)
    DuplicateEmail(String),

    // 409 Conflict (illegal swap status change)
    InvalidTransition(String),

    // 400 Bad Request (skill id not owned by the expected party)
    InvalidSkillReference(String),

    // 409 Conflict (wrong status, wrong actor, or duplicate feedback)
    FeedbackNotAllowed(String),

    // 403 Forbidden (message sender not in the conversation)
    NotAParticipant(String),

    // 502 Bad Gateway (AI collaborator failed; calls are advisory only and
    // never touch persisted state)
    EvaluationUnavailable(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DuplicateEmail(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidTransition(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidSkillReference(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::FeedbackNotAllowed(msg) => (StatusCode::CONFLICT, msg),
            AppError::NotAParticipant(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::EvaluationUnavailable(msg) => {
                tracing::warn!("AI evaluation unavailable: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Evaluation unavailable".to_string(),
                )
            }
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `serde_json::Error` into `AppError::InternalServerError`.
/// A collection that fails to deserialize means the store file is corrupt,
/// not that the caller sent bad input.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
