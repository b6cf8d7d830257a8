//! # Login Tests

use super::*;
use lib_auth::PasswordHasher;
use lib_core::model::store::AccountForCreate;

const LOGIN: &str = "/api/users/login";

async fn seed_account(store: &SqliteAccountStore, username: &str, password: &str) {
    let password_hash = Argon2Hasher::new()
        .hash(password)
        .expect("Password hashing should succeed in test");
    store
        .save(AccountForCreate::new(username, password_hash))
        .await
        .expect("Account creation should succeed in test");
}

#[tokio::test]
async fn test_login_success() {
    // Arrange
    let (app, store) = test_app().await;
    seed_account(&store, "alice", "secret1").await;

    // Act
    let (status, body) = post_credentials(&app, LOGIN, "alice", "secret1").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Login successful!");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (app, store) = test_app().await;
    seed_account(&store, "alice", "secret1").await;

    let (status, body) = post_credentials(&app, LOGIN, "alice", "wrong").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Invalid credentials!");
}

#[tokio::test]
async fn test_login_unknown_user_matches_wrong_password() {
    let (app, store) = test_app().await;
    seed_account(&store, "alice", "secret1").await;

    let unknown = post_credentials(&app, LOGIN, "mallory", "secret1").await;
    let wrong = post_credentials(&app, LOGIN, "alice", "wrong").await;

    assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn test_login_password_is_case_sensitive() {
    let (app, store) = test_app().await;
    seed_account(&store, "alice", "Secret1").await;

    let (status, _) = post_credentials(&app, LOGIN, "alice", "secret1").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_stored_hash_as_password_fails() {
    let (app, store) = test_app().await;
    seed_account(&store, "alice", "secret1").await;
    let account = store.find_by_username("alice").await.unwrap().unwrap();

    let (status, _) = post_credentials(&app, LOGIN, "alice", &account.password_hash).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_malformed_body() {
    let (app, _) = test_app().await;

    let (status, _) = post_json(&app, LOGIN, r#"{"username":42,"password":"x"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
