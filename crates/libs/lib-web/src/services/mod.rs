//! # Services Layer
//!
//! Business logic sitting between the HTTP handlers and the account store:
//!
//! ```text
//! Handlers (HTTP) → CredentialService → AccountStore / PasswordHasher
//! ```
//!
//! Services receive their collaborators through constructors and return
//! `Result<T, AppError>`; handlers turn that into a response.

pub mod credentials;

pub use credentials::{CredentialOutcome, CredentialService};
