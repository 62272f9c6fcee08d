//! Authentication and authorization logic.
//!
//! Password hashing, access-token issuance and verification, refresh-token
//! persistence, bearer extraction, the authorization gate, and the
//! login/refresh/revoke session flow built on top of them.

pub mod bearer;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod queries;
pub mod refresh_token;
pub mod session;

use chrono::Duration;
use thiserror::Error;

/// Access token lifetime: 1 hour.
pub const ACCESS_TOKEN_TTL: Duration = Duration::hours(1);

/// Refresh token lifetime: 60 days.
pub const REFRESH_TOKEN_TTL: Duration = Duration::days(60);

/// Why an access token was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token signature is invalid")]
    SignatureMismatch,

    #[error("token is expired")]
    Expired,
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Hashing failure: {0}")]
    Hashing(String),

    #[error("Verification failure: {0}")]
    Verification(String),

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Missing or malformed authorization header")]
    MissingOrMalformedHeader,

    #[error("Unauthorized: {0}")]
    Unauthorized(#[source] Box<AuthError>),

    #[error("Refresh token not found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Wrap a failure as `Unauthorized`, keeping the original as the reason.
    pub fn unauthorized(reason: AuthError) -> Self {
        match reason {
            already @ AuthError::Unauthorized(_) => already,
            other => AuthError::Unauthorized(Box::new(other)),
        }
    }

    /// The underlying reason of an `Unauthorized` error, or `self`.
    pub fn reason(&self) -> &AuthError {
        match self {
            AuthError::Unauthorized(inner) => &**inner,
            other => other,
        }
    }
}
