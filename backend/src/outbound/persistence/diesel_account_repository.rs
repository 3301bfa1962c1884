//! PostgreSQL-backed `AccountRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{
    Account, AccountId, AccountName, Email, NewAccount, PasswordHash, Role, StoredAccount,
};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::DbPool;
use super::schema::accounts;

const EMAIL_CONSTRAINT: &str = "accounts_email_key";

/// Diesel implementation of the credential store.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> AccountRepositoryError {
    if is_unique_violation(&error, EMAIL_CONSTRAINT) {
        return AccountRepositoryError::duplicate_email();
    }
    map_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

fn row_to_account(row: AccountRow) -> Result<StoredAccount, AccountRepositoryError> {
    let invalid = |err: crate::domain::AccountValidationError| {
        AccountRepositoryError::query(format!("stored account {} is invalid: {err}", row.id))
    };
    let account = Account {
        id: AccountId::from_uuid(row.id),
        name: AccountName::new(&row.name).map_err(invalid)?,
        email: Email::new(&row.email).map_err(invalid)?,
        role: row.role.parse::<Role>().map_err(invalid)?,
    };
    Ok(StoredAccount {
        account,
        password_hash: PasswordHash::new(row.password_hash),
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;

        let row = NewAccountRow {
            id: *account.account.id.as_uuid(),
            name: account.account.name.as_ref(),
            email: account.account.email.as_ref(),
            password_hash: account.password_hash.as_str(),
            role: account.account.role.as_str(),
        };
        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_error)?;

        Ok(account.account.clone())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(row_to_account).transpose()
    }
}
