//! # Account Repository
//!
//! SQLite-backed [`AccountStore`].
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, AccountForCreate, AccountStore, SqliteAccountStore};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite:data/accounts.db").await?;
//! let store = SqliteAccountStore::new(pool);
//!
//! let account = store
//!     .save(AccountForCreate::new("alice", "$argon2id$v=19$..."))
//!     .await?;
//!
//! let found = store.find_by_username("alice").await?;
//! assert_eq!(found.map(|a| a.id), Some(account.id));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use sqlx::query_as;
use tracing::debug;

use super::models::{Account, AccountForCreate};
use super::{AccountStore, DbPool};
use crate::error::{AppError, Result};

/// Account store backed by the `accounts` table.
///
/// Username uniqueness is enforced by the table's `UNIQUE` constraint, so
/// concurrent signups for one name cannot both succeed.
#[derive(Debug, Clone)]
pub struct SqliteAccountStore {
    pool: DbPool,
}

impl SqliteAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `AppError::AlreadyExists` - username already registered (UNIQUE constraint)
    /// - `AppError::Persistence` - any other database failure
    async fn save(&self, account: AccountForCreate) -> Result<Account> {
        debug!("[STORE] Inserting account: {}", account.username);

        let result = sqlx::query("INSERT INTO accounts (username, password_hash) VALUES (?, ?)")
            .bind(&account.username)
            .bind(&account.password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::AlreadyExists(_) => AppError::AlreadyExists(account.username.clone()),
                other => other,
            })?;

        let id = result.last_insert_rowid();

        let created = query_as::<_, Account>("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let account = query_as::<_, Account>("SELECT * FROM accounts WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }
}
