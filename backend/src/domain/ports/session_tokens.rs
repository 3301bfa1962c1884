//! Port for minting and verifying signed session tokens.

use crate::domain::{Identity, IssuedToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session token adapters.
    pub enum SessionTokenError {
        /// Bad signature, malformed payload or expired token. Callers must
        /// not distinguish between these.
        Invalid => "session token is invalid or expired",
        /// The token could not be signed.
        Signing { message: String } => "session token signing failed: {message}",
    }
}

/// Stateless token issuer/verifier. Verification is pure and cheap, so the
/// trait is synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokens: Send + Sync {
    fn issue(&self, identity: &Identity) -> Result<IssuedToken, SessionTokenError>;

    fn verify(&self, token: &str) -> Result<Identity, SessionTokenError>;
}
