//! # chirpy_api
//!
//! HTTP API library for Chirpy.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use chirpy_core::auth::queries::PgRefreshTokenStore;
use chirpy_core::auth::refresh_token::RefreshTokenStore;
use chirpy_core::auth::session::SessionService;
use chirpy_core::chirps::{ChirpStore, PgChirpStore};
use chirpy_core::memory::{MemoryChirpStore, MemoryRefreshTokenStore, MemoryUserStore};
use chirpy_core::users::{PgUserStore, UserStore};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::ApiConfig;
use crate::handlers::{admin, auth, chirps, health, users};
use crate::metrics::HitCounter;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Login / refresh / revoke flow.
    pub sessions: SessionService,
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Chirps.
    pub chirps: Arc<dyn ChirpStore>,
    /// `/app/` hit counter.
    pub hits: Arc<HitCounter>,
}

impl AppState {
    /// Assemble state from explicit stores.
    pub fn new(
        config: ApiConfig,
        users: Arc<dyn UserStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        chirps: Arc<dyn ChirpStore>,
    ) -> Self {
        let sessions = SessionService::new(users.clone(), refresh_tokens, &config.jwt_secret);
        Self {
            config,
            sessions,
            users,
            chirps,
            hits: Arc::new(HitCounter::new()),
        }
    }

    /// State backed by Postgres.
    pub fn postgres(config: ApiConfig, pool: PgPool) -> Self {
        Self::new(
            config,
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgRefreshTokenStore::new(pool.clone())),
            Arc::new(PgChirpStore::new(pool)),
        )
    }

    /// State backed by process memory. Nothing survives a restart.
    pub fn in_memory(config: ApiConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryRefreshTokenStore::new()),
            Arc::new(MemoryChirpStore::new()),
        )
    }
}

/// Run embedded database migrations.
///
/// Delegates to `chirpy_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    chirpy_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/api/healthz", get(health::healthz))
        .route("/api/users", post(users::create_user_handler))
        .route("/api/login", post(auth::login_handler))
        .route("/api/refresh", post(auth::refresh_handler))
        .route("/api/revoke", post(auth::revoke_handler))
        .route("/api/chirps", get(chirps::list_chirps_handler))
        .route("/api/chirps/{chirp_id}", get(chirps::get_chirp_handler))
        .route("/api/validate_chirp", post(chirps::validate_chirp_handler))
        .route("/admin/metrics", get(admin::metrics_handler))
        .route("/admin/reset", post(admin::reset_handler));

    // Protected routes (require a valid access token)
    let protected = Router::new()
        .route("/api/users", axum::routing::put(users::update_user_handler))
        .route("/api/chirps", post(chirps::create_chirp_handler))
        .route(
            "/api/chirps/{chirp_id}",
            axum::routing::delete(chirps::delete_chirp_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let app_files = Router::new()
        .nest_service("/app", ServeDir::new(&state.config.filepath_root))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            metrics::count_hits,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(app_files)
        .layer(cors)
        .with_state(state)
}
