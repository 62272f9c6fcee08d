//! Chirps: short messages owned by the user who posted them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::chirp::Chirp;
use crate::uuid::uuidv7;

/// Longest accepted chirp body, in characters.
pub const MAX_CHIRP_LEN: usize = 140;

/// Words masked out of chirp bodies, compared case-insensitively.
const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replacement for a masked word.
const MASK: &str = "****";

/// Chirp errors.
#[derive(Debug, Error)]
pub enum ChirpError {
    #[error("Chirp not found: {0}")]
    NotFound(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// Check the length limit and mask profanity, returning the body to store.
pub fn validate_chirp(body: &str) -> Result<String, ChirpError> {
    if body.chars().count() > MAX_CHIRP_LEN {
        return Err(ChirpError::Validation("Chirp is too long".into()));
    }
    Ok(clean_body(body))
}

/// Mask profane words. Only whole space-separated words are matched.
pub fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Persistence for chirps.
#[async_trait]
pub trait ChirpStore: Send + Sync {
    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<Chirp, ChirpError>;

    /// All chirps, oldest first, optionally restricted to one author.
    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<Chirp>, ChirpError>;

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, ChirpError>;

    /// Delete a chirp. Returns whether a row was removed.
    async fn delete_chirp(&self, id: Uuid) -> Result<bool, ChirpError>;
}

type ChirpRow = (Uuid, DateTime<Utc>, DateTime<Utc>, String, Uuid);

fn from_row((id, created_at, updated_at, body, user_id): ChirpRow) -> Chirp {
    Chirp {
        id,
        created_at,
        updated_at,
        body,
        user_id,
    }
}

/// Postgres-backed [`ChirpStore`].
#[derive(Debug, Clone)]
pub struct PgChirpStore {
    pool: PgPool,
}

impl PgChirpStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChirpStore for PgChirpStore {
    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<Chirp, ChirpError> {
        let row = sqlx::query_as::<_, ChirpRow>(
            "INSERT INTO chirps (id, body, user_id) VALUES ($1, $2, $3) \
             RETURNING id, created_at, updated_at, body, user_id",
        )
        .bind(uuidv7())
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(from_row(row))
    }

    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<Chirp>, ChirpError> {
        let rows = sqlx::query_as::<_, ChirpRow>(
            "SELECT id, created_at, updated_at, body, user_id FROM chirps \
             WHERE $1::uuid IS NULL OR user_id = $1 \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, ChirpError> {
        let row = sqlx::query_as::<_, ChirpRow>(
            "SELECT id, created_at, updated_at, body, user_id FROM chirps WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(from_row))
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<bool, ChirpError> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
