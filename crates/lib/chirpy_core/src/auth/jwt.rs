//! JWT access-token generation and verification.
//!
//! Tokens are HS256-signed, carry `iss`, `sub` (user id), `iat` and `exp`,
//! and are never stored server-side. Expiry is checked with zero leeway.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::warn;
use uuid::Uuid;

use super::{AuthError, TokenError};
use crate::models::auth::TokenClaims;

/// `iss` claim stamped on and required of every access token.
pub const TOKEN_ISSUER: &str = "chirpy-access";

/// Environment variable holding the signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Generate a signed JWT access token for `user_id`, valid for `ttl`.
///
/// A negative `ttl` yields an already-expired token. An empty secret is
/// accepted and produces a token verifiable with the same empty secret.
pub fn make_access_token(user_id: Uuid, secret: &[u8], ttl: Duration) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        iss: TOKEN_ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Verify a JWT access token, returning the user id it was issued for.
pub fn validate_access_token(token: &str, secret: &[u8]) -> Result<Uuid, TokenError> {
    let key = DecodingKey::from_secret(secret);
    let data = decode::<TokenClaims>(token, &key, &validation()).map_err(classify)?;
    Uuid::parse_str(&data.claims.sub)
        .map_err(|e| TokenError::Malformed(format!("subject is not a user id: {e}")))
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(err.to_string()),
    }
}

/// Resolve the signing secret from `JWT_SECRET`.
///
/// Falls back to the empty secret when unset: tokens stay structurally
/// valid but anyone can forge them.
pub fn resolve_jwt_secret() -> String {
    match std::env::var(JWT_SECRET_ENV) {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            warn!("{JWT_SECRET_ENV} is not set; signing access tokens with an empty secret");
            String::new()
        }
    }
}
