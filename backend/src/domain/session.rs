//! Identity recovered from a verified session token.

use chrono::{DateTime, Utc};

use super::{Account, AccountId, AccountName, Role};

/// Caller identity exposed to handlers once a bearer token verifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: AccountId,
    pub role: Role,
    pub name: AccountName,
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            role: account.role,
            name: account.name.clone(),
        }
    }
}

/// Signed token handed to a client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
