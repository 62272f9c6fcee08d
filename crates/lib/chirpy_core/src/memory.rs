//! In-memory store implementations.
//!
//! Used for tests and for running the server without a database. Each
//! operation touches one map entry under its shard lock, which gives the
//! same per-operation atomicity the Postgres stores get from the database.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::auth::AuthError;
use crate::auth::refresh_token::RefreshTokenStore;
use crate::chirps::{ChirpError, ChirpStore};
use crate::models::auth::{RefreshTokenRecord, User, UserWithPassword};
use crate::models::chirp::Chirp;
use crate::users::UserStore;
use crate::uuid::uuidv7;

/// Refresh tokens keyed by token value.
#[derive(Debug, Default)]
pub struct MemoryRefreshTokenStore {
    tokens: DashMap<String, RefreshTokenRecord>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<(), AuthError> {
        use dashmap::mapref::entry::Entry;

        match self.tokens.entry(record.token.clone()) {
            Entry::Occupied(_) => Err(AuthError::Internal("duplicate refresh token".into())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError> {
        Ok(self.tokens.get(token).map(|r| r.value().clone()))
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool, AuthError> {
        match self.tokens.get_mut(token) {
            Some(mut record) => {
                if record.revoked_at.is_none() {
                    record.revoked_at = Some(at);
                }
                record.updated_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Users keyed by id. Email uniqueness needs a check-then-insert across
/// entries, so the whole table sits behind one lock.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserWithPassword>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AuthError {
    AuthError::Internal("user store lock poisoned".into())
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AuthError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.iter().any(|u| u.user.email == email) {
            return Err(AuthError::ValidationError("Email already registered".into()));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
        };
        users.push(UserWithPassword {
            user: user.clone(),
            hashed_password: hashed_password.to_string(),
        });
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, AuthError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.user.email == email).cloned())
    }

    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<User>, AuthError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.iter().any(|u| u.user.email == email && u.user.id != id) {
            return Err(AuthError::ValidationError("Email already registered".into()));
        }
        let Some(row) = users.iter_mut().find(|u| u.user.id == id) else {
            return Ok(None);
        };
        row.user.email = email.to_string();
        row.user.updated_at = Utc::now();
        row.hashed_password = hashed_password.to_string();
        Ok(Some(row.user.clone()))
    }
}

/// Chirps keyed by id.
#[derive(Debug, Default)]
pub struct MemoryChirpStore {
    chirps: DashMap<Uuid, Chirp>,
}

impl MemoryChirpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChirpStore for MemoryChirpStore {
    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: uuidv7(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id,
        };
        self.chirps.insert(chirp.id, chirp.clone());
        Ok(chirp)
    }

    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps: Vec<Chirp> = self
            .chirps
            .iter()
            .filter(|c| author_id.is_none_or(|author| c.user_id == author))
            .map(|c| c.value().clone())
            .collect();
        chirps.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(chirps)
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, ChirpError> {
        Ok(self.chirps.get(&id).map(|c| c.value().clone()))
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<bool, ChirpError> {
        Ok(self.chirps.remove(&id).is_some())
    }
}
