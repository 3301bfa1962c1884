//! bcrypt-backed `PasswordHasher`.

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Work factor used for new hashes.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Salted bcrypt hashing. Existing hashes verify at whatever cost they were
/// created with.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        bcrypt::hash(password, self.cost)
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        bcrypt::verify(password, hash.as_str())
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))
    }
}
