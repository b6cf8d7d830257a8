//! # Authentication Data Transfer Objects
//!
//! Request body and response messages for the account endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/users/signup` - [`CredentialsRequest`] -> [`SIGNUP_SUCCESS`]
//! - `POST /api/users/login` - [`CredentialsRequest`] -> [`LOGIN_SUCCESS`] or [`INVALID_CREDENTIALS`]
//!
//! ## Wire Format
//!
//! Requests are JSON objects with **snake_case** field names. Responses are plain
//! text bodies:
//!
//! ```text
//! POST /api/users/signup
//! Content-Type: application/json
//!
//! {
//!   "username": "alice",
//!   "password": "secret1"
//! }
//! ```
//!
//! Response:
//! ```text
//! HTTP/1.1 200 OK
//! content-type: text/plain; charset=utf-8
//!
//! User registered successfully!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body returned by a successful signup.
pub const SIGNUP_SUCCESS: &str = "User registered successfully!";

/// Body returned by a successful login.
pub const LOGIN_SUCCESS: &str = "Login successful!";

/// Body returned for an unknown user or a wrong password. Both cases share it so
/// callers cannot tell which usernames exist.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials!";

/// Body returned when signing up with a username that is already registered.
pub const USERNAME_TAKEN: &str = "Username already exists!";

/// Username/password pair accepted by both signup and login.
///
/// # Fields
///
/// * `username` - Account identifier, unique across the store
/// * `password` - Plaintext password; hashed server-side before it reaches storage
///
/// `Debug` output redacts the password so the struct can sit in tracing fields.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &"***REDACTED***")
            .finish()
    }
}
