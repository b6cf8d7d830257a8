//! # Account Handler Tests
//!
//! Drive the real router (routes, middleware, CORS) against an in-memory SQLite
//! database migrated with the production schema.

mod login;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_auth::Argon2Hasher;
use lib_core::model::store::{create_pool, run_migrations, AccountStore, SqliteAccountStore};
use tower::ServiceExt;

use crate::server::{create_router, AppState};
use crate::services::CredentialService;

const MIGRATIONS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../migrations");

pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Fresh, migrated in-memory store.
pub async fn setup_test_store() -> Arc<SqliteAccountStore> {
    let pool = create_pool("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    run_migrations(&pool, MIGRATIONS)
        .await
        .expect("Failed to apply migrations");

    Arc::new(SqliteAccountStore::new(pool))
}

/// Router over the given store with the production hasher.
pub fn test_app_with(store: Arc<dyn AccountStore>) -> Router {
    let service = CredentialService::new(store, Arc::new(Argon2Hasher::new()));
    create_router(AppState::new(service), &[TEST_ORIGIN.to_string()])
}

/// Router plus a handle on its store for inspecting persisted rows.
pub async fn test_app() -> (Router, Arc<SqliteAccountStore>) {
    let store = setup_test_store().await;
    (test_app_with(store.clone()), store)
}

/// POST a raw JSON body and return the status and text body.
pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// POST a `{username, password}` body built with `serde_json`.
pub async fn post_credentials(
    app: &Router,
    uri: &str,
    username: &str,
    password: &str,
) -> (StatusCode, String) {
    let body = serde_json::json!({ "username": username, "password": password });
    post_json(app, uri, &body.to_string()).await
}
