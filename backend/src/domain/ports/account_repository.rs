//! Port for the credential store.

use async_trait::async_trait;

use crate::domain::{Account, Email, NewAccount, StoredAccount};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// The email is already registered; surfaced to callers as a
        /// duplicate identity rather than a store failure.
        DuplicateEmail => "an account with this email already exists",
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
    }
}

/// Credential store keyed by unique email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account. Fails with
    /// [`AccountRepositoryError::DuplicateEmail`] when the email is taken.
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError>;

    /// Look up an account together with its password hash.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError>;
}
