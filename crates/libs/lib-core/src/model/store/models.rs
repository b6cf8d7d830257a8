use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Account entity representing a complete record from the store.
///
/// `password_hash` is always a salted PHC string produced by a
/// `lib_auth::PasswordHasher`, never the submitted plaintext.
#[derive(Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"***REDACTED***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Data structure for creating a new account.
///
/// Carries the hash, not the password: the plaintext must be hashed before one
/// of these can be built.
#[derive(Clone)]
pub struct AccountForCreate {
    pub username: String,
    pub password_hash: String,
}

impl AccountForCreate {
    /// Create a new `AccountForCreate` instance.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl fmt::Debug for AccountForCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountForCreate")
            .field("username", &self.username)
            .field("password_hash", &"***REDACTED***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g";

    #[test]
    fn test_account_debug_redacts_hash() {
        let account = Account {
            id: 1,
            username: "alice".to_string(),
            password_hash: HASH.to_string(),
            created_at: Utc::now(),
        };

        let debug = format!("{:?}", account);
        assert!(debug.contains("alice"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("argon2id"));
    }

    #[test]
    fn test_account_for_create_debug_redacts_hash() {
        let debug = format!("{:?}", AccountForCreate::new("alice", HASH));

        assert!(debug.contains("alice"));
        assert!(!debug.contains("argon2id"));
    }
}
