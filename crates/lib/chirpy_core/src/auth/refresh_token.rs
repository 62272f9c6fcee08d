//! Refresh tokens: opaque random strings persisted server-side.
//!
//! A token stays valid for repeated use until it expires or is revoked.
//! Using it never rotates or consumes it.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use uuid::Uuid;

use super::AuthError;
use crate::models::auth::RefreshTokenRecord;

/// Length of a generated refresh token (alphanumeric characters).
pub const REFRESH_TOKEN_LEN: usize = 64;

/// Persistence for refresh tokens. Each call is one atomic unit of work.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Persist a newly issued token.
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<(), AuthError>;

    /// Exact-match lookup by token value.
    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError>;

    /// Set `revoked_at` to `at` unless already revoked.
    ///
    /// Returns `false` when no row holds `token`.
    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool, AuthError>;
}

/// Generate a cryptographically random refresh token (64 alphanumeric chars).
pub fn make_refresh_token() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Generate, persist and return a refresh token for `user_id`, valid for `ttl`.
pub async fn issue(
    store: &dyn RefreshTokenStore,
    user_id: Uuid,
    ttl: Duration,
) -> Result<RefreshTokenRecord, AuthError> {
    let now = Utc::now();
    let record = RefreshTokenRecord {
        token: make_refresh_token(),
        user_id,
        created_at: now,
        updated_at: now,
        expires_at: now + ttl,
        revoked_at: None,
    };
    store.insert(&record).await?;
    Ok(record)
}

/// Look up a token by value. Unknown tokens fail with `NotFound`.
pub async fn lookup(
    store: &dyn RefreshTokenStore,
    token: &str,
) -> Result<RefreshTokenRecord, AuthError> {
    store.find(token).await?.ok_or(AuthError::NotFound)
}

/// Revoke a token. Unknown tokens fail with `NotFound`; revoking twice succeeds.
pub async fn revoke(store: &dyn RefreshTokenStore, token: &str) -> Result<(), AuthError> {
    if store.revoke(token, Utc::now()).await? {
        Ok(())
    } else {
        Err(AuthError::NotFound)
    }
}
