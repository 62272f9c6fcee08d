//! `Authorization` header parsing.

use super::AuthError;

/// Scheme prefix expected on bearer credentials. Matched case-sensitively.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the raw token from an `Authorization` header value.
///
/// A missing header, an empty value, another scheme, or an empty token after
/// the prefix all fail with `MissingOrMalformedHeader`.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingOrMalformedHeader)
}
