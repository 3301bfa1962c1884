//! Credential payloads for signup and login.
//!
//! Inbound adapters hand raw strings to these constructors so validation
//! lives in the domain. Passwords are held in [`Zeroizing`] buffers and
//! wiped on drop.

use std::fmt;

use zeroize::Zeroizing;

use super::{AccountName, AccountValidationError, Email, Error, Role};

/// bcrypt only reads the first 72 bytes of a password; longer inputs are
/// rejected instead of being silently truncated.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Validation failures for signup and login payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// A required field was absent or blank.
    MissingField(&'static str),
    PasswordTooLong { max: usize },
    Account(AccountValidationError),
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} bytes")
            }
            Self::Account(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<AccountValidationError> for CredentialsValidationError {
    fn from(value: AccountValidationError) -> Self {
        Self::Account(value)
    }
}

impl From<CredentialsValidationError> for Error {
    fn from(value: CredentialsValidationError) -> Self {
        match value {
            CredentialsValidationError::MissingField(field) => {
                Error::invalid_field(field, "missing_field", value.to_string())
            }
            CredentialsValidationError::PasswordTooLong { .. } => {
                Error::invalid_field("password", "password_too_long", value.to_string())
            }
            CredentialsValidationError::Account(inner) => inner.into(),
        }
    }
}

fn required<'a>(
    field: &'static str,
    raw: Option<&'a str>,
) -> Result<&'a str, CredentialsValidationError> {
    match raw {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CredentialsValidationError::MissingField(field)),
    }
}

fn password(raw: Option<&str>) -> Result<Zeroizing<String>, CredentialsValidationError> {
    // Whitespace is significant in passwords, so only emptiness is checked.
    let value = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return Err(CredentialsValidationError::MissingField("password")),
    };
    if value.len() > PASSWORD_MAX_BYTES {
        return Err(CredentialsValidationError::PasswordTooLong {
            max: PASSWORD_MAX_BYTES,
        });
    }
    Ok(Zeroizing::new(value.to_owned()))
}

/// Validated signup request.
///
/// # Examples
/// ```
/// use saarthi_backend::domain::{Registration, Role};
///
/// let reg = Registration::try_from_parts(
///     Some("Asha"),
///     Some("asha@example.org"),
///     Some("pw"),
///     Some("officer"),
/// )
/// .unwrap();
/// assert_eq!(reg.role(), Role::Officer);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: AccountName,
    email: Email,
    password: Zeroizing<String>,
    role: Role,
}

impl Registration {
    /// Validate raw signup fields. Missing fields are reported before
    /// malformed ones, in declaration order.
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
        password_raw: Option<&str>,
        role: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let name = required("name", name)?;
        let email = required("email", email)?;
        let password = password(password_raw)?;
        let role = required("role", role)?;

        Ok(Self {
            name: AccountName::new(name)?,
            email: Email::new(email)?,
            password,
            role: role.parse()?,
        })
    }

    pub fn name(&self) -> &AccountName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Login request. The email is kept raw: a malformed address must fail as
/// invalid credentials rather than leak which field was wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(
        email: Option<&str>,
        password_raw: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let email = required("email", email)?;
        let password = password(password_raw)?;
        Ok(Self {
            email: email.trim().to_owned(),
            password,
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
