//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used by the
//! store, the credential service and the HTTP handlers. It follows the `thiserror`
//! pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`InvalidCredentials`](AppError::InvalidCredentials) → 401 Unauthorized
//!    - [`AlreadyExists`](AppError::AlreadyExists) → 409 Conflict
//!
//! 2. **Server Errors** (5xx)
//!    - [`Persistence`](AppError::Persistence) → 500 Internal Server Error
//!    - [`Hashing`](AppError::Hashing) → 500 Internal Server Error
//!    - [`Config`](AppError::Config) → 500 Internal Server Error
//!
//! Server errors never leak their detail to the client; the full message goes to
//! the logs instead.
//!
//! ## Error Conversion
//!
//! - `From<sqlx::Error>` - unique violations become `AlreadyExists`, the rest `Persistence`
//! - `From<JsonRejection>` - malformed request bodies become `InvalidInput`
//! - `From<lib_utils::envs::Error>` - environment problems become `Config`

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::dto::{INVALID_CREDENTIALS, USERNAME_TAKEN};

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body could not be deserialized.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown username or wrong password. Deliberately carries no detail.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Signup for a username that is already registered.
    ///
    /// **HTTP Status**: 409 Conflict
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    /// Storage layer failure. Fatal for the request, never retried.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The password hashing primitive failed.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Hashing error: {0}")]
    Hashing(String),

    /// Configuration error during startup or environment loading.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::Persistence(_) | AppError::Hashing(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the message sent back to the client.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
            AppError::AlreadyExists(_) => USERNAME_TAKEN.to_string(),
            AppError::Persistence(_) | AppError::Hashing(_) | AppError::Config(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    /// Short variant name, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::AlreadyExists(_) => "AlreadyExists",
            AppError::Persistence(_) => "Persistence",
            AppError::Hashing(_) => "Hashing",
            AppError::Config(_) => "Config",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "Server error: {}", self);
        } else {
            tracing::debug!(code = self.code(), "Client error: {}", self);
        }

        (status, self.user_message()).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::AlreadyExists(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) => {
                AppError::Persistence(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Persistence(format!("Database error: {}", err)),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidInput("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::AlreadyExists("alice".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Persistence("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Persistence("UNIQUE constraint failed: accounts.username".into());
        assert_eq!(err.user_message(), "An internal error occurred");

        let err = AppError::Hashing("rng failure".into());
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_credential_messages() {
        assert_eq!(
            AppError::InvalidCredentials.user_message(),
            "Invalid credentials!"
        );
        assert_eq!(
            AppError::AlreadyExists("alice".into()).user_message(),
            "Username already exists!"
        );
    }

    #[test]
    fn test_env_error_becomes_config() {
        let err: AppError = lib_utils::envs::Error::WrongFormat("BIND_ADDRESS").into();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_row_not_found_is_persistence() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_into_response_plain_text_body() {
        let response = AppError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Body should be readable");
        assert_eq!(&body[..], b"Invalid credentials!");
    }
}
