//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads configuration, opens and migrates the database, wires the
//! [`CredentialService`] into [`AppState`], and serves [`create_router`].

// region: --- Imports
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use lib_auth::Argon2Hasher;
use lib_core::model::store::SqliteAccountStore;
use lib_core::{create_pool, run_migrations, Config};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::handlers;
use crate::middleware::{log_requests, stamp_req, RequestStamp};
use crate::services::CredentialService;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialService,
}

impl AppState {
    pub fn new(credentials: CredentialService) -> Self {
        Self { credentials }
    }
}

impl FromRef<AppState> for CredentialService {
    fn from_ref(state: &AppState) -> Self {
        state.credentials.clone()
    }
}
// endregion: --- AppState

// region: --- Server Setup
/// Install the global tracing subscriber.
///
/// The filter comes from `LOG_LEVEL`, defaulting to `info`. Calling this twice
/// is harmless.
pub fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(&log_level))
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Build the tracing filter from a `LOG_LEVEL` value.
///
/// Accepts any `EnvFilter` directive (`debug`, `lib_web=debug,sqlx=warn`);
/// anything unparsable falls back to `info`.
fn log_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize and start the HTTP server.
///
/// Reads configuration from the process environment; loading a `.env` file is
/// left to the binary.
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection fails
/// - Database migrations fail
/// - Server binding fails
pub async fn start_server() -> anyhow::Result<()> {
    init_tracing();

    info!(" ACCOUNT SERVICE STARTING");

    info!("Loading configuration...");
    let config = Config::from_env()?;
    config.validate()?;

    info!("Database URL: {}", config.database_url);
    ensure_database_dir(&config.database_url)?;

    info!("Connecting to database...");
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool, Path::new(&config.migrations_path)).await?;
    info!(" Migrations complete");

    let credentials = CredentialService::new(
        Arc::new(SqliteAccountStore::new(pool)),
        Arc::new(Argon2Hasher::new()),
    );
    let app = create_router(AppState::new(credentials), &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info(config.bind_address, &config.allowed_origins);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the application router with all routes and middleware.
///
/// Only `allowed_origins` may make cross-origin browser calls; entries that are
/// not valid header values are skipped with a warning.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("[ROUTE SETUP] Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/api/users/signup", post(handlers::users::signup))
        .route("/api/users/login", post(handlers::users::login))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Route not found") })
        .with_state(state)
        // Innermost first: logging and the trace span both see the request stamp.
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}",
                            error
                        );
                    },
                ),
        )
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Create the parent directory of a file-backed SQLite database.
fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    if database_url.contains(":memory:") {
        return Ok(());
    }

    let Some(db_path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };
    let db_path = db_path.split('?').next().unwrap_or(db_path);

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }

    Ok(())
}

/// Log server information
fn log_server_info(bind_address: SocketAddr, allowed_origins: &[String]) {
    info!(" ACCOUNTS:");
    info!("   • POST http://{}/api/users/signup", bind_address);
    info!("   • POST http://{}/api/users/login", bind_address);
    info!(" HEALTH:");
    info!("   • GET  http://{}/health", bind_address);
    info!(" CORS origins: {}", allowed_origins.join(", "));
}
// endregion: --- Server Setup

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_database_dir_creates_parent() {
        let root = std::env::temp_dir().join(format!("lib-web-test-{}", uuid::Uuid::new_v4()));
        let url = format!("sqlite:{}/nested/accounts.db?mode=rwc", root.display());

        ensure_database_dir(&url).expect("Directory creation should succeed");
        assert!(root.join("nested").is_dir());

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_log_filter_accepts_directives() {
        let filter = log_filter("lib_web=debug,sqlx=warn").to_string();

        assert!(filter.contains("lib_web=debug"));
        assert!(filter.contains("sqlx=warn"));
    }

    #[test]
    fn test_log_filter_bare_level() {
        assert_eq!(log_filter("debug").to_string(), "debug");
    }

    #[test]
    fn test_log_filter_falls_back_to_info() {
        assert_eq!(log_filter("lib_web=loud").to_string(), "info");
    }

    #[test]
    fn test_ensure_database_dir_ignores_memory() {
        assert!(ensure_database_dir("sqlite::memory:").is_ok());
    }
}
