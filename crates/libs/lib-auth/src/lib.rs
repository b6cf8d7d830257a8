//! # Authentication Library
//!
//! Salted one-way password hashing and verification.

pub mod pwd;

// Re-export commonly used types
pub use pwd::{Argon2Hasher, Error, PasswordHasher};
