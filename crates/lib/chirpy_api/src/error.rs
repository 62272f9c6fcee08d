//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chirpy_core::auth::AuthError;
use chirpy_core::chirps::ChirpError;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Message shown for every rejected token, whatever the cause.
const UNAUTHORIZED_MESSAGE: &str = "Couldn't validate token";

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            AppError::Internal(detail) => {
                error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => AppError::Unauthorized(e.to_string()),
            AuthError::Token(_)
            | AuthError::MissingOrMalformedHeader
            | AuthError::NotFound
            | AuthError::Unauthorized(_) => {
                debug!(reason = %e.reason(), "request unauthorized");
                AppError::Unauthorized(UNAUTHORIZED_MESSAGE.into())
            }
            AuthError::Forbidden => AppError::Forbidden("Not the owner of this resource".into()),
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::DbError(e) => AppError::from(e),
            AuthError::Hashing(msg) | AuthError::Verification(msg) | AuthError::Internal(msg) => {
                AppError::Internal(msg)
            }
        }
    }
}

impl From<ChirpError> for AppError {
    fn from(e: ChirpError) -> Self {
        match e {
            ChirpError::NotFound(id) => AppError::NotFound(format!("Chirp {id} doesn't exist")),
            ChirpError::Validation(msg) => AppError::Validation(msg),
            ChirpError::DbError(e) => AppError::from(e),
        }
    }
}
