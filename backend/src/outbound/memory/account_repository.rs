//! In-memory `AccountRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, Email, NewAccount, StoredAccount};

use super::lock;

/// Accounts keyed by normalised email, mirroring the unique index.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<Email, StoredAccount>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut accounts = lock(&self.accounts, AccountRepositoryError::query)?;
        if accounts.contains_key(&account.account.email) {
            return Err(AccountRepositoryError::duplicate_email());
        }
        accounts.insert(
            account.account.email.clone(),
            StoredAccount {
                account: account.account.clone(),
                password_hash: account.password_hash.clone(),
            },
        );
        Ok(account.account.clone())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let accounts = lock(&self.accounts, AccountRepositoryError::query)?;
        Ok(accounts.get(email).cloned())
    }
}
