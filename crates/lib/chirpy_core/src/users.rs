//! User accounts: the record lookup the login flow consumes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthError;
use crate::models::auth::{User, UserWithPassword};

/// Persistence for user accounts. Only password hashes are ever stored.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user. Fails with `ValidationError` if the email is taken.
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AuthError>;

    /// Fetch a user and their password hash by email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, AuthError>;

    /// Replace a user's email and password hash.
    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<User>, AuthError>;
}

type UserRow = (Uuid, DateTime<Utc>, DateTime<Utc>, String);

fn user_from_row((id, created_at, updated_at, email): UserRow) -> User {
    User {
        id,
        created_at,
        updated_at,
        email,
    }
}

fn email_taken(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db) = &err
        && db.is_unique_violation()
    {
        return AuthError::ValidationError("Email already registered".into());
    }
    AuthError::DbError(err)
}

/// Postgres-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (email, hashed_password) VALUES ($1, $2) \
             RETURNING id, created_at, updated_at, email",
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(email_taken)?;
        Ok(user_from_row(row))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, AuthError> {
        let row = sqlx::query_as::<_, (Uuid, DateTime<Utc>, DateTime<Utc>, String, String)>(
            "SELECT id, created_at, updated_at, email, hashed_password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(
            |(id, created_at, updated_at, email, hashed_password)| UserWithPassword {
                user: User {
                    id,
                    created_at,
                    updated_at,
                    email,
                },
                hashed_password,
            },
        ))
    }

    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users SET email = $2, hashed_password = $3, updated_at = now() \
             WHERE id = $1 \
             RETURNING id, created_at, updated_at, email",
        )
        .bind(id)
        .bind(email)
        .bind(hashed_password)
        .fetch_optional(&self.pool)
        .await
        .map_err(email_taken)?;
        Ok(row.map(user_from_row))
    }
}
