//! Secret fingerprinting for operational visibility.
//!
//! Operators compare the logged fingerprint across instances to confirm a
//! rotation landed everywhere without the secret itself reaching the logs.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 digest of `secret`, as 16 lowercase hex
/// characters.
///
/// # Examples
///
/// ```rust
/// use saarthi_backend::inbound::http::token_config::fingerprint::secret_fingerprint;
///
/// let fp = secret_fingerprint(b"correct horse battery staple");
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
