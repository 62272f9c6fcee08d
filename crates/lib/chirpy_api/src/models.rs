//! Typed request and response bodies.
//!
//! Field-level validation happens here, at the boundary, before any core
//! call.

use chirpy_core::auth::password::MAX_PASSWORD_BYTES;
use chirpy_core::models::auth::User;
use chirpy_core::models::chirp::Chirp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Error body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// `POST /api/users`, `PUT /api/users` and `POST /api/login` body.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require("email", &self.email)?;
        require("password", &self.password)
    }

    /// `validate` plus the limits on a password about to be hashed.
    pub fn validate_new_password(&self) -> Result<(), AppError> {
        self.validate()?;
        if self.password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::Validation(format!(
                "password must be at most {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        Ok(())
    }
}

/// `POST /api/chirps` and `POST /api/validate_chirp` body.
#[derive(Debug, Deserialize)]
pub struct ChirpRequest {
    pub body: String,
}

impl ChirpRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require("body", &self.body)
    }
}

/// `GET /api/chirps` query.
#[derive(Debug, Default, Deserialize)]
pub struct ListChirpsQuery {
    pub author_id: Option<Uuid>,
}

/// Public view of a user.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
        }
    }
}

/// `POST /api/login` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// `POST /api/refresh` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// `POST /api/validate_chirp` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateChirpResponse {
    pub cleaned_body: String,
}

/// Public view of a chirp.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChirpResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

impl From<Chirp> for ChirpResponse {
    fn from(chirp: Chirp) -> Self {
        Self {
            id: chirp.id,
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body,
            user_id: chirp.user_id,
        }
    }
}
