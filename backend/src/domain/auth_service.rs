//! Signup and login services.
//!
//! Password hashing is CPU-bound, so every hasher call runs on the blocking
//! pool via [`TraceId::spawn_blocking`] to keep the request's trace id in
//! scope for anything the hasher logs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, LoginOutcome, LoginService, PasswordHashError,
    PasswordHasher, SessionTokenError, SessionTokens, SignupService,
};
use crate::domain::{
    Account, AccountId, Email, Error, Identity, LoginCredentials, NewAccount, PasswordHash,
    Registration, TraceId,
};

/// Password hashed once per process and verified whenever a login names an
/// unknown email, so both failure paths pay for one hash verification.
const DUMMY_PASSWORD: &str = "saarthi-timing-equaliser";

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Service implementing [`SignupService`] and [`LoginService`].
pub struct AuthService<A, H, T> {
    accounts: Arc<A>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    dummy_hash: OnceCell<PasswordHash>,
}

impl<A, H, T> AuthService<A, H, T> {
    pub fn new(accounts: Arc<A>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
            dummy_hash: OnceCell::new(),
        }
    }
}

impl<A, H, T> AuthService<A, H, T>
where
    A: AccountRepository,
    H: PasswordHasher + 'static,
    T: SessionTokens,
{
    fn map_account_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::DuplicateEmail => {
                Error::duplicate_identity("Email already exists")
            }
            AccountRepositoryError::Connection { message } => {
                Error::internal(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account repository error: {message}"))
            }
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(error.to_string())
    }

    fn map_token_error(error: SessionTokenError) -> Error {
        Error::internal(error.to_string())
    }

    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        TraceId::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(Self::map_hash_error)
    }

    async fn verify_password(&self, password: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        TraceId::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(Self::map_hash_error)
    }

    async fn dummy_hash(&self) -> Result<PasswordHash, Error> {
        self.dummy_hash
            .get_or_try_init(|| self.hash_password(DUMMY_PASSWORD))
            .await
            .cloned()
    }
}

#[async_trait]
impl<A, H, T> SignupService for AuthService<A, H, T>
where
    A: AccountRepository,
    H: PasswordHasher + 'static,
    T: SessionTokens,
{
    async fn signup(&self, registration: &Registration) -> Result<Account, Error> {
        let password_hash = self.hash_password(registration.password()).await?;
        let new_account = NewAccount {
            account: Account {
                id: AccountId::random(),
                name: registration.name().clone(),
                email: registration.email().clone(),
                role: registration.role(),
            },
            password_hash,
        };

        let account = self
            .accounts
            .insert(&new_account)
            .await
            .map_err(Self::map_account_error)?;
        info!(account_id = %account.id, role = %account.role, "account registered");
        Ok(account)
    }
}

#[async_trait]
impl<A, H, T> LoginService for AuthService<A, H, T>
where
    A: AccountRepository,
    H: PasswordHasher + 'static,
    T: SessionTokens,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        // A malformed address cannot match any account; treat it as unknown.
        let stored = match Email::new(credentials.email()) {
            Ok(email) => self
                .accounts
                .find_by_email(&email)
                .await
                .map_err(Self::map_account_error)?,
            Err(_) => None,
        };

        let Some(stored) = stored else {
            let dummy = self.dummy_hash().await?;
            self.verify_password(credentials.password(), dummy).await?;
            debug!("login rejected: unknown email");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        };

        if !self
            .verify_password(credentials.password(), stored.password_hash)
            .await?
        {
            debug!(account_id = %stored.account.id, "login rejected: password mismatch");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        }

        let token = self
            .tokens
            .issue(&Identity::from(&stored.account))
            .map_err(Self::map_token_error)?;
        info!(account_id = %stored.account.id, "login succeeded");
        Ok(LoginOutcome {
            token,
            account: stored.account,
        })
    }
}
