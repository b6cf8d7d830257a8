//! In-memory account store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::models::{Account, AccountForCreate};
use super::AccountStore;
use crate::error::{AppError, Result};

/// Map-backed [`AccountStore`]. Contents live as long as the value.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn save(&self, account: AccountForCreate) -> Result<Account> {
        // Check and insert under one write lock so duplicate signups cannot interleave.
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.username) {
            return Err(AppError::AlreadyExists(account.username));
        }

        let created = Account {
            id: accounts.len() as i64 + 1,
            username: account.username,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        };
        accounts.insert(created.username.clone(), created.clone());

        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(username).cloned())
    }
}
