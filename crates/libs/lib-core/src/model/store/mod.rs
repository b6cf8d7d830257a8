//! # Account Store
//!
//! Database connection pool, the [`AccountStore`] persistence contract, and its
//! implementations.
//!
//! - [`SqliteAccountStore`] - production store over a SQLite pool
//! - [`InMemoryAccountStore`] - map-backed store for tests and throwaway runs
//!
//! Both stores own uniqueness of usernames: a second `save` for the same username
//! fails with [`AppError::AlreadyExists`](crate::AppError::AlreadyExists) and leaves
//! the first record untouched.

// region: --- Modules
pub mod account_repository;
pub mod in_memory;
pub mod models;
// endregion: --- Modules

// region: --- Re-exports
pub use account_repository::SqliteAccountStore;
pub use in_memory::InMemoryAccountStore;
pub use models::{Account, AccountForCreate};
// endregion: --- Re-exports

// region: --- Types and Functions
use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::Result;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Persistence collaborator for accounts, keyed by username.
///
/// Implementations must make `save` atomic per username.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account. Fails with `AlreadyExists` if the username is taken.
    async fn save(&self, account: AccountForCreate) -> Result<Account>;

    /// Look up an account by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;
}

/// Create a new SQLite connection pool, creating the database file if missing.
///
/// In-memory URLs get a single long-lived connection, since every SQLite
/// connection to `:memory:` opens its own private database.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = if database_url.contains(":memory:") {
        debug!("In-memory database requested, pinning a single connection");
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePool::connect_with(options).await?
    };

    Ok(pool)
}

/// Apply the SQL migrations found in `migrations_path`.
pub async fn run_migrations(pool: &DbPool, migrations_path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = migrations_path.as_ref();
    info!("Running database migrations from: {}", path.display());

    let migrator = sqlx::migrate::Migrator::new(path).await?;
    migrator.run(pool).await?;

    Ok(())
}
// endregion: --- Types and Functions
