//! Chirpy API server binary.

use std::time::Duration;

use chirpy_api::AppState;
use chirpy_api::config::ApiConfig;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "chirpy_api_server", about = "Chirpy API server")]
struct Args {
    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/chirpy"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Directory served under `/app/`.
    #[arg(long, env = "FILEPATH_ROOT", default_value = ".")]
    filepath_root: String,

    /// Keep users, chirps and refresh tokens in memory instead of Postgres.
    #[arg(long, default_value_t = false)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chirpy_api=debug,chirpy_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: format!("127.0.0.1:{}", args.port),
        pg_connection_url: args.database_url,
        filepath_root: args.filepath_root,
        ..ApiConfig::from_env()
    };

    let state = if args.in_memory {
        warn!("running with in-memory stores; data is lost on exit");
        AppState::in_memory(config.clone())
    } else {
        info!(max_connections = args.max_connections, "connecting to database");
        let pool = PgPoolOptions::new()
            .max_connections(args.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.pg_connection_url)
            .await?;

        info!("running database migrations");
        chirpy_api::migrate(&pool).await?;

        AppState::postgres(config.clone(), pool)
    };

    let app = chirpy_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
