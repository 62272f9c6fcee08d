//! Authentication middleware — Bearer token extraction and JWT verification.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chirpy_core::auth::gate::{AuthenticatedIdentity, authenticate};

use crate::AppState;
use crate::error::AppError;

/// Identity stored in request extensions by [`require_auth`].
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub AuthenticatedIdentity);

/// Axum middleware: verifies `Authorization: Bearer <access token>` and
/// injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = bearer_header(request.headers());
    let identity = authenticate(header, state.sessions.secret())?;
    request.extensions_mut().insert(AuthenticatedUser(identity));

    Ok(next.run(request).await)
}

/// Read the raw bearer value from a request's headers.
pub fn bearer_header(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
}
