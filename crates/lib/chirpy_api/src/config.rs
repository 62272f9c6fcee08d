//! API server configuration.

use chirpy_core::auth::jwt::resolve_jwt_secret;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// Access-token signing secret. May be empty.
    pub jwt_secret: String,
    /// Directory served under `/app/`.
    pub filepath_root: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable        | Default                              |
    /// |-----------------|--------------------------------------|
    /// | `BIND_ADDR`     | `127.0.0.1:8080`                     |
    /// | `DATABASE_URL`  | `postgres://localhost:5432/chirpy`   |
    /// | `JWT_SECRET`    | empty (logged as a warning)          |
    /// | `FILEPATH_ROOT` | `.`                                  |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into()),
            pg_connection_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/chirpy".into()),
            jwt_secret: resolve_jwt_secret(),
            filepath_root: std::env::var("FILEPATH_ROOT").unwrap_or_else(|_| ".".into()),
        }
    }
}
