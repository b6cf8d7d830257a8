//! # Data Transfer Objects (DTOs)
//!
//! Request bodies and response messages exchanged over the REST API.

pub mod auth;

pub use auth::*;
