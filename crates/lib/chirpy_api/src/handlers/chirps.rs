//! Chirp endpoints.
//!
//! Reading a chirp needs no credentials; creating needs a valid access token;
//! deleting also needs the caller to own the chirp.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chirpy_core::auth::gate::authorize_ownership;
use chirpy_core::chirps::{ChirpError, validate_chirp};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{ChirpRequest, ChirpResponse, ListChirpsQuery, ValidateChirpResponse};

/// `POST /api/chirps` — post a chirp as the authenticated user.
pub async fn create_chirp_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
    Json(body): Json<ChirpRequest>,
) -> AppResult<(StatusCode, Json<ChirpResponse>)> {
    body.validate()?;
    let cleaned = validate_chirp(&body.body)?;
    let chirp = state.chirps.create_chirp(identity.user_id, &cleaned).await?;
    Ok((StatusCode::CREATED, Json(chirp.into())))
}

/// `GET /api/chirps` — all chirps, oldest first.
pub async fn list_chirps_handler(
    State(state): State<AppState>,
    Query(query): Query<ListChirpsQuery>,
) -> AppResult<Json<Vec<ChirpResponse>>> {
    let chirps = state.chirps.list_chirps(query.author_id).await?;
    Ok(Json(chirps.into_iter().map(ChirpResponse::from).collect()))
}

/// `GET /api/chirps/{chirp_id}` — one chirp. Not ownership-gated.
pub async fn get_chirp_handler(
    State(state): State<AppState>,
    Path(chirp_id): Path<Uuid>,
) -> AppResult<Json<ChirpResponse>> {
    let chirp = state
        .chirps
        .get_chirp(chirp_id)
        .await?
        .ok_or(ChirpError::NotFound(chirp_id))?;
    Ok(Json(chirp.into()))
}

/// `DELETE /api/chirps/{chirp_id}` — delete one of the caller's chirps.
pub async fn delete_chirp_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
    Path(chirp_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let chirp = state
        .chirps
        .get_chirp(chirp_id)
        .await?
        .ok_or(ChirpError::NotFound(chirp_id))?;
    authorize_ownership(&identity, chirp.user_id)?;

    if !state.chirps.delete_chirp(chirp_id).await? {
        return Err(ChirpError::NotFound(chirp_id).into());
    }
    info!(user_id = %identity.user_id, %chirp_id, "chirp deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/validate_chirp` — length check and profanity masking only.
pub async fn validate_chirp_handler(
    Json(body): Json<ChirpRequest>,
) -> AppResult<Json<ValidateChirpResponse>> {
    let cleaned_body = validate_chirp(&body.body)?;
    Ok(Json(ValidateChirpResponse { cleaned_body }))
}
