//! Refresh-token database queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::AuthError;
use super::refresh_token::RefreshTokenStore;
use crate::models::auth::RefreshTokenRecord;

type RefreshTokenRow = (
    String,
    Uuid,
    DateTime<Utc>,
    DateTime<Utc>,
    DateTime<Utc>,
    Option<DateTime<Utc>>,
);

fn from_row(
    (token, user_id, created_at, updated_at, expires_at, revoked_at): RefreshTokenRow,
) -> RefreshTokenRecord {
    RefreshTokenRecord {
        token,
        user_id,
        created_at,
        updated_at,
        expires_at,
        revoked_at,
    }
}

/// Store a refresh token.
pub async fn store_refresh_token(
    pool: &PgPool,
    record: &RefreshTokenRecord,
) -> Result<(), AuthError> {
    sqlx::query(
        "INSERT INTO refresh_tokens (token, created_at, updated_at, user_id, expires_at, revoked_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&record.token)
    .bind(record.created_at)
    .bind(record.updated_at)
    .bind(record.user_id)
    .bind(record.expires_at)
    .bind(record.revoked_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Find a refresh token by value, whether or not it is still usable.
pub async fn find_refresh_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<RefreshTokenRecord>, AuthError> {
    let row = sqlx::query_as::<_, RefreshTokenRow>(
        "SELECT token, user_id, created_at, updated_at, expires_at, revoked_at \
         FROM refresh_tokens WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(from_row))
}

/// Revoke a refresh token by value. An earlier revocation time is kept.
///
/// Returns whether a row matched.
pub async fn revoke_refresh_token(
    pool: &PgPool,
    token: &str,
    at: DateTime<Utc>,
) -> Result<bool, AuthError> {
    let result = sqlx::query(
        "UPDATE refresh_tokens \
         SET revoked_at = COALESCE(revoked_at, $2), updated_at = $2 \
         WHERE token = $1",
    )
    .bind(token)
    .bind(at)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Postgres-backed [`RefreshTokenStore`].
#[derive(Debug, Clone)]
pub struct PgRefreshTokenStore {
    pool: PgPool,
}

impl PgRefreshTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<(), AuthError> {
        store_refresh_token(&self.pool, record).await
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError> {
        find_refresh_token(&self.pool, token).await
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool, AuthError> {
        revoke_refresh_token(&self.pool, token, at).await
    }
}
