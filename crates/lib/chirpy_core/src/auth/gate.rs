//! Authorization gate: who is calling, and may they touch this resource.

use tracing::debug;
use uuid::Uuid;

use super::AuthError;
use super::bearer::extract_bearer_token;
use super::jwt::validate_access_token;

/// Identity established from a verified access token. Lives for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user_id: Uuid,
}

/// Authenticate a request from its `Authorization` header value.
///
/// Every failure is reported as `Unauthorized`; the bearer or token error
/// that caused it is kept as the reason for logging.
pub fn authenticate(header: Option<&str>, secret: &[u8]) -> Result<AuthenticatedIdentity, AuthError> {
    let token = extract_bearer_token(header).map_err(AuthError::unauthorized)?;
    let user_id = validate_access_token(token, secret).map_err(|e| {
        debug!(reason = %e, "access token rejected");
        AuthError::unauthorized(e.into())
    })?;
    Ok(AuthenticatedIdentity { user_id })
}

/// Allow the call only if `identity` owns the resource.
///
/// Apply before every update or delete. Reads are not gated.
pub fn authorize_ownership(
    identity: &AuthenticatedIdentity,
    resource_owner_id: Uuid,
) -> Result<(), AuthError> {
    if identity.user_id == resource_owner_id {
        Ok(())
    } else {
        debug!(
            user_id = %identity.user_id,
            owner_id = %resource_owner_id,
            "ownership check failed"
        );
        Err(AuthError::Forbidden)
    }
}
