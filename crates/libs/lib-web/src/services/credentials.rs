//! # Credential Service
//!
//! Business logic for registering accounts and checking logins.
//!
//! ## Rules
//!
//! - A password is hashed (fresh salt per call) before anything reaches the store.
//! - Login compares the submitted password against the stored hash with the
//!   hasher's constant-time verification, never by string equality.
//! - Unknown usernames and wrong passwords fail identically with
//!   `AppError::InvalidCredentials`, and both run one hash verification.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lib_auth::Argon2Hasher;
//! use lib_core::dto::CredentialsRequest;
//! use lib_core::model::store::InMemoryAccountStore;
//! use lib_web::services::CredentialService;
//! use std::sync::Arc;
//!
//! # async fn example() -> lib_core::Result<()> {
//! let service = CredentialService::new(
//!     Arc::new(InMemoryAccountStore::new()),
//!     Arc::new(Argon2Hasher::new()),
//! );
//!
//! service.signup(CredentialsRequest::new("alice", "secret1")).await?;
//! service.login(CredentialsRequest::new("alice", "secret1")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - `AppError::AlreadyExists` - signup for a registered username
//! - `AppError::InvalidCredentials` - login failed
//! - `AppError::Persistence` / `AppError::Hashing` - collaborator failure, not retried

use std::sync::{Arc, OnceLock};

use lib_auth::PasswordHasher;
use lib_core::dto::{CredentialsRequest, LOGIN_SUCCESS, SIGNUP_SUCCESS};
use lib_core::model::store::{AccountForCreate, AccountStore};
use lib_core::{AppError, Result};
use tracing::{debug, instrument, warn};

/// Successful result of a credential operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialOutcome {
    Registered,
    Authenticated,
}

impl CredentialOutcome {
    /// Response body for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            CredentialOutcome::Registered => SIGNUP_SUCCESS,
            CredentialOutcome::Authenticated => LOGIN_SUCCESS,
        }
    }
}

/// Signup and login over an account store and a password hasher.
///
/// Holds no per-request state; clones share the same collaborators.
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn PasswordHasher>,
    /// Hash verified against when the username is unknown. Built on first use.
    decoy_hash: Arc<OnceLock<String>>,
}

/// Password behind the decoy hash. Never belongs to an account.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

impl CredentialService {
    pub fn new(store: Arc<dyn AccountStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            store,
            hasher,
            decoy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Hash produced by this service's hasher with its own parameters, so
    /// verifying against it costs the same as verifying a real account.
    fn decoy_hash(&self) -> &str {
        self.decoy_hash.get_or_init(|| {
            self.hasher.hash(DECOY_PASSWORD).unwrap_or_else(|e| {
                warn!("[CREDENTIALS] Could not build decoy hash: {}", e);
                String::new()
            })
        })
    }

    /// Hash the password and persist a new account.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn signup(&self, credentials: CredentialsRequest) -> Result<CredentialOutcome> {
        debug!("[CREDENTIALS] Hashing password...");
        let password_hash = self
            .hasher
            .hash(&credentials.password)
            .map_err(|e| AppError::Hashing(e.to_string()))?;

        debug!("[CREDENTIALS] Saving account...");
        self.store
            .save(AccountForCreate::new(credentials.username, password_hash))
            .await?;

        Ok(CredentialOutcome::Registered)
    }

    /// Check a username/password pair against the stored hash.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: CredentialsRequest) -> Result<CredentialOutcome> {
        let Some(account) = self.store.find_by_username(&credentials.username).await? else {
            warn!("[CREDENTIALS] Unknown username");
            let _ = self.hasher.verify(&credentials.password, self.decoy_hash());
            return Err(AppError::InvalidCredentials);
        };

        debug!("[CREDENTIALS] Verifying password...");
        if !self.hasher.verify(&credentials.password, &account.password_hash) {
            warn!("[CREDENTIALS] Password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        Ok(CredentialOutcome::Authenticated)
    }
}
