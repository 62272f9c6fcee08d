//! Password hashing via bcrypt.

use bcrypt::BcryptError;
use tracing::warn;

use super::AuthError;

/// bcrypt cost factor.
pub const BCRYPT_COST: u32 = 10;

/// Longest password bcrypt can hash without truncation. bcrypt reads 72
/// bytes and the trailing NUL takes one of them.
pub const MAX_PASSWORD_BYTES: usize = 71;

/// Hash a password with bcrypt (cost 10, fresh random salt per call).
///
/// Passwords longer than [`MAX_PASSWORD_BYTES`] are refused rather than
/// truncated.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::non_truncating_hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Hashing(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
///
/// `Ok(false)` is a plain mismatch, including a password too long to have
/// been hashed. `Err(Verification)` means the stored hash is not a bcrypt
/// hash this build can read.
pub fn check_password_hash(password: &str, hash: &str) -> Result<bool, AuthError> {
    match bcrypt::non_truncating_verify(password, hash) {
        Ok(matched) => Ok(matched),
        Err(BcryptError::Truncation(_)) => Ok(false),
        Err(e) => {
            warn!("stored password hash is unreadable: {e}");
            Err(AuthError::Verification(format!("bcrypt verify: {e}")))
        }
    }
}
