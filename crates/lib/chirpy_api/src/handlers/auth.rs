//! Session endpoints: login, refresh, revoke.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use chirpy_core::auth::AuthError;
use chirpy_core::auth::bearer::extract_bearer_token;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::bearer_header;
use crate::models::{CredentialsRequest, LoginResponse, RefreshResponse};

/// `POST /api/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<Json<LoginResponse>> {
    body.validate()?;
    let outcome = state.sessions.login(&body.email, &body.password).await?;
    Ok(Json(LoginResponse {
        user: outcome.user.into(),
        access_token: outcome.access_token,
        refresh_token: outcome.refresh_token,
    }))
}

/// `POST /api/refresh` — exchange the bearer refresh token for an access token.
pub async fn refresh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<RefreshResponse>> {
    let token = refresh_token_from(&headers)?;
    let access_token = state.sessions.refresh(token).await?;
    Ok(Json(RefreshResponse { access_token }))
}

/// `POST /api/revoke` — revoke the bearer refresh token.
pub async fn revoke_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    let token = refresh_token_from(&headers)?;
    state.sessions.revoke(token).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn refresh_token_from(headers: &HeaderMap) -> Result<&str, AppError> {
    extract_bearer_token(bearer_header(headers))
        .map_err(|e| AppError::from(AuthError::unauthorized(e)))
}
