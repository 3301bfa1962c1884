//! Driving ports for signup and login.
//!
//! Inbound adapters call these without knowing how credentials are stored,
//! hashed or signed, so handler tests can substitute doubles.

use async_trait::async_trait;

use crate::domain::{Account, Error, IssuedToken, LoginCredentials, Registration};

/// Successful login: the signed token and the public account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: IssuedToken,
    pub account: Account,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account, failing with `duplicate_identity` when the email
    /// is taken.
    async fn signup(&self, registration: &Registration) -> Result<Account, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and mint a session token. Unknown email and wrong
    /// password both fail with `invalid_credentials`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
