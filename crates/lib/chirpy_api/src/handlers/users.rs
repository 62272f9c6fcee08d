//! User account endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chirpy_core::auth::password::hash_password;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CredentialsRequest, UserResponse};

/// `POST /api/users` — register a new account.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    body.validate_new_password()?;
    let hashed = hash_password(&body.password)?;
    let user = state.users.create_user(&body.email, &hashed).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `PUT /api/users` — change the caller's own email and password.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<Json<UserResponse>> {
    body.validate_new_password()?;
    let hashed = hash_password(&body.password)?;
    let user = state
        .users
        .update_user(identity.user_id, &body.email, &hashed)
        .await?
        .ok_or_else(|| AppError::NotFound("User doesn't exist".into()))?;
    Ok(Json(user.into()))
}
