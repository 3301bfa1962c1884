//! Token signing configuration.
//!
//! The signing secret and token lifetime come from the environment through
//! [`mockable::Env`] so the build-mode rules can be tested without touching
//! process state:
//!
//! - `TOKEN_SECRET` holds the secret inline; `TOKEN_SECRET_FILE` names a file
//!   containing it. The inline value wins when both are set.
//! - Release builds require a secret of at least [`TOKEN_SECRET_MIN_LEN`]
//!   bytes. Debug builds fall back to an ephemeral random secret, which
//!   invalidates every token on restart.
//! - `TOKEN_TTL_HOURS` overrides the 12 hour default.

pub mod fingerprint;

use std::path::PathBuf;

use chrono::TimeDelta;
use mockable::Env;
use rand::RngCore;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::token::DEFAULT_TOKEN_TTL_HOURS;

pub const TOKEN_SECRET_ENV: &str = "TOKEN_SECRET";
pub const TOKEN_SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
pub const TOKEN_TTL_HOURS_ENV: &str = "TOKEN_TTL_HOURS";
/// Minimum secret length accepted in release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const TTL_MAX_HOURS: i64 = 24 * 30;

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates missing or malformed values with a warning.
    Debug,
    /// Rejects missing or malformed values.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Where the active secret came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SecretSource {
    Inline,
    File,
    Ephemeral,
}

/// Validated token settings.
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
    source: SecretSource,
    ttl: TimeDelta,
}

impl TokenSettings {
    pub fn secret(&self) -> &[u8] {
        self.secret.as_slice()
    }

    pub fn source(&self) -> SecretSource {
        self.source
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Truncated digest of the secret, safe to log.
    pub fn fingerprint(&self) -> String {
        fingerprint::secret_fingerprint(self.secret())
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    #[error("missing token secret; set TOKEN_SECRET or TOKEN_SECRET_FILE")]
    MissingSecret,
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
    #[error("invalid value for TOKEN_TTL_HOURS='{value}'; expected 1..=720")]
    InvalidTtl { value: String },
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use saarthi_backend::inbound::http::token_config::{BuildMode, token_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "TOKEN_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     "TOKEN_TTL_HOURS" => Some("2".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release).expect("valid settings");
/// assert_eq!(settings.ttl().num_hours(), 2);
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let ttl = ttl_from_env(env, mode)?;
    let (secret, source) = secret_from_env(env, mode)?;
    check_length(&secret, source, mode)?;
    Ok(TokenSettings {
        secret,
        source,
        ttl,
    })
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<TimeDelta, TokenConfigError> {
    let default = TimeDelta::hours(DEFAULT_TOKEN_TTL_HOURS);
    let Some(value) = env.string(TOKEN_TTL_HOURS_ENV) else {
        return Ok(default);
    };
    match value.trim().parse::<i64>() {
        Ok(hours) if (1..=TTL_MAX_HOURS).contains(&hours) => Ok(TimeDelta::hours(hours)),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_TTL_HOURS; using default");
            Ok(default)
        }
        _ => Err(TokenConfigError::InvalidTtl { value }),
    }
}

fn secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<(Zeroizing<Vec<u8>>, SecretSource), TokenConfigError> {
    let inline = env.string(TOKEN_SECRET_ENV).map(Zeroizing::new);
    let file = env.string(TOKEN_SECRET_FILE_ENV);

    if let Some(secret) = inline.filter(|value| !value.is_empty()) {
        if file.is_some() {
            warn!("both TOKEN_SECRET and TOKEN_SECRET_FILE set; using TOKEN_SECRET");
        }
        return Ok((Zeroizing::new(secret.as_bytes().to_vec()), SecretSource::Inline));
    }

    match file {
        Some(path) => {
            let path = PathBuf::from(path);
            match std::fs::read(&path) {
                Ok(bytes) => Ok((trim_trailing_newline(Zeroizing::new(bytes)), SecretSource::File)),
                Err(error) if mode.is_debug() => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "using ephemeral token secret (dev only)"
                    );
                    Ok((ephemeral_secret(), SecretSource::Ephemeral))
                }
                Err(error) => Err(TokenConfigError::SecretRead {
                    path,
                    source: error,
                }),
            }
        }
        None if mode.is_debug() => {
            warn!("no token secret configured; using ephemeral secret (dev only)");
            Ok((ephemeral_secret(), SecretSource::Ephemeral))
        }
        None => Err(TokenConfigError::MissingSecret),
    }
}

fn check_length(
    secret: &[u8],
    source: SecretSource,
    mode: BuildMode,
) -> Result<(), TokenConfigError> {
    let length = secret.len();
    if length >= TOKEN_SECRET_MIN_LEN || source == SecretSource::Ephemeral {
        return Ok(());
    }
    if mode.is_debug() {
        warn!(length, "token secret shorter than recommended minimum");
        return Ok(());
    }
    Err(TokenConfigError::SecretTooShort {
        length,
        min_len: TOKEN_SECRET_MIN_LEN,
    })
}

/// Secret files written with `echo` end in a newline that is not part of
/// the secret.
fn trim_trailing_newline(mut bytes: Zeroizing<Vec<u8>>) -> Zeroizing<Vec<u8>> {
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    bytes
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    rand::thread_rng().fill_bytes(secret.as_mut_slice());
    secret
}

#[cfg(test)]
mod tests;
