//! # Account Handlers
//!
//! HTTP request handlers for the account endpoints.
//!
//! - `POST /api/users/signup` - register a username/password pair
//! - `POST /api/users/login` - check a username/password pair
//!
//! Handlers do no validation of their own: the body is deserialized, handed to
//! [`CredentialService`] unchanged, and the outcome becomes a plain text response.
//! A body that fails to deserialize is answered with `400 Bad Request`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{Router, routing::post};
//! use lib_web::handlers::users::{signup, login};
//! use lib_web::AppState;
//!
//! # fn example(state: AppState) {
//! let app: Router = Router::new()
//!     .route("/api/users/signup", post(signup))
//!     .route("/api/users/login", post(login))
//!     .with_state(state);
//! # }
//! ```

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use lib_core::dto::CredentialsRequest;
use lib_core::AppError;
use tracing::{debug, info, instrument, warn};

use crate::services::CredentialService;

/// Signup handler - registers a new account.
///
/// # Returns
///
/// * `200 "User registered successfully!"` - account stored
/// * `400` - body is not a `{username, password}` JSON object
/// * `409 "Username already exists!"` - username taken
/// * `500` - hashing or storage failure
#[instrument(skip_all)]
pub async fn signup(
    State(service): State<CredentialService>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, &'static str), AppError> {
    info!("[SIGNUP] NEW SIGNUP REQUEST");

    let Json(req) = payload.map_err(|rejection| {
        warn!("[SIGNUP] Malformed request body: {}", rejection.body_text());
        AppError::from(rejection)
    })?;
    debug!("   Username: {}", req.username);

    match service.signup(req).await {
        Ok(outcome) => {
            info!("[SIGNUP] Account registered");
            Ok((StatusCode::OK, outcome.message()))
        }
        Err(e) => {
            warn!("[SIGNUP] Signup failed: {}", e);
            Err(e)
        }
    }
}

/// Login handler - verifies an existing account's password.
///
/// # Returns
///
/// * `200 "Login successful!"` - password matches
/// * `400` - body is not a `{username, password}` JSON object
/// * `401 "Invalid credentials!"` - unknown username or wrong password
/// * `500` - storage failure
#[instrument(skip_all)]
pub async fn login(
    State(service): State<CredentialService>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, &'static str), AppError> {
    info!("[LOGIN] LOGIN ATTEMPT");

    let Json(req) = payload.map_err(|rejection| {
        warn!("[LOGIN] Malformed request body: {}", rejection.body_text());
        AppError::from(rejection)
    })?;
    debug!("   Username: {}", req.username);

    match service.login(req).await {
        Ok(outcome) => {
            info!("[LOGIN] User authenticated");
            Ok((StatusCode::OK, outcome.message()))
        }
        Err(e) => {
            warn!("[LOGIN] Login failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests;
