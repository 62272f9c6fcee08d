//! # chirpy_core
//!
//! Core domain logic for Chirpy: password credentials, signed access tokens,
//! persisted refresh tokens, and the user/chirp stores the session flow reads.

pub mod auth;
pub mod chirps;
pub mod memory;
pub mod migrate;
pub mod models;
pub mod users;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
