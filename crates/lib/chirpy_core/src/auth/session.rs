//! Login, silent refresh, and logout over one session.
//!
//! `Unauthenticated → Authenticated(access, refresh) → Authenticated(new access)
//! → Revoked`. Refresh never rotates the refresh token.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::jwt::make_access_token;
use super::password::check_password_hash;
use super::refresh_token::{self, RefreshTokenStore};
use super::{ACCESS_TOKEN_TTL, AuthError, REFRESH_TOKEN_TTL};
use crate::models::auth::User;
use crate::users::UserStore;

/// Result of a successful login: both credentials or neither.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Session flow over a user store, a refresh-token store and a signing secret.
#[derive(Clone)]
pub struct SessionService {
    users: Arc<dyn UserStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    secret: Arc<[u8]>,
}

impl SessionService {
    pub fn new(
        users: Arc<dyn UserStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        secret: impl AsRef<[u8]>,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            secret: Arc::from(secret.as_ref()),
        }
    }

    /// The access-token signing secret.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Authenticate with email and password, issuing an access/refresh pair.
    ///
    /// Unknown email, wrong password and unreadable stored hash all fail with
    /// `InvalidCredentials`. Failures after the password check are `Internal`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let Some(record) = self.users.find_user_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        // A corrupt stored hash is logged by `check_password_hash`.
        if !matches!(check_password_hash(password, &record.hashed_password), Ok(true)) {
            return Err(AuthError::InvalidCredentials);
        }

        let user = record.user;
        let access_token = self
            .issue_access_token(user.id)
            .map_err(|e| AuthError::Internal(format!("couldn't create access token: {e}")))?;
        let refresh =
            refresh_token::issue(self.refresh_tokens.as_ref(), user.id, REFRESH_TOKEN_TTL)
                .await
                .map_err(|e| AuthError::Internal(format!("couldn't save refresh token: {e}")))?;

        info!(user_id = %user.id, "user logged in");
        Ok(LoginOutcome {
            user,
            access_token,
            refresh_token: refresh.token,
        })
    }

    /// Mint a new access token from a usable refresh token.
    ///
    /// Absent, expired and revoked tokens are all `Unauthorized(NotFound)`.
    /// The refresh token itself is left untouched.
    pub async fn refresh(&self, token: &str) -> Result<String, AuthError> {
        let record = refresh_token::lookup(self.refresh_tokens.as_ref(), token)
            .await
            .map_err(|e| match e {
                AuthError::NotFound => AuthError::unauthorized(e),
                other => other,
            })?;
        if !record.is_usable() {
            return Err(AuthError::unauthorized(AuthError::NotFound));
        }

        let access_token = self.issue_access_token(record.user_id)?;
        info!(user_id = %record.user_id, "access token refreshed");
        Ok(access_token)
    }

    /// Revoke a refresh token. Unknown tokens are `Unauthorized(NotFound)`.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        refresh_token::revoke(self.refresh_tokens.as_ref(), token)
            .await
            .map_err(|e| match e {
                AuthError::NotFound => AuthError::unauthorized(e),
                other => other,
            })?;
        info!("refresh token revoked");
        Ok(())
    }

    fn issue_access_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        make_access_token(user_id, &self.secret, ACCESS_TOKEN_TTL)
    }
}
