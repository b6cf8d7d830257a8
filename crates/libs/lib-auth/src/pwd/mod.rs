//! # Password Hashing
//!
//! Password hashing and verification using Argon2.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`), so the
//! per-password salt travels with the hash and verification needs nothing else.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2,
};
use std::fmt::Debug;

/// Errors raised by the hashing primitive.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// One-way salted password hashing.
///
/// `hash` must generate a fresh salt on every call; `verify` must compare in constant
/// time and report an unparseable hash as a mismatch rather than an error.
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a plaintext password with a freshly generated salt.
    fn hash(&self, password: &str) -> Result<String, Error>;

    /// Verify a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, Error> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| Error::Hash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
