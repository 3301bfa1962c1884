//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each
//! [`ErrorCode`] to a status code and serialises the payload as the JSON error
//! envelope shared by every endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Signup used an email that already belongs to an account.
    DuplicateIdentity,
    /// Login failed; unknown email and wrong password are indistinguishable.
    InvalidCredentials,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but the role may not perform this operation.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred inside the domain or a store.
    InternalError,
}

impl ErrorCode {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::DuplicateIdentity => "Email already exists",
            Self::InvalidCredentials => "Invalid credentials",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Access denied",
            Self::NotFound => "Not found",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Error payload returned by services and adapters.
///
/// Construction captures the trace identifier in scope so responses can be
/// correlated with logs without threading the identifier manually.
///
/// # Examples
/// ```
/// use saarthi_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("project not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "project not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Something went wrong")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none", alias = "trace_id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create an error. Blank messages fall back to a generic description of
    /// `code` so payloads never carry an empty message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Override the captured trace identifier.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Validation failure naming the offending field and a machine code.
    ///
    /// # Examples
    /// ```
    /// use saarthi_backend::domain::Error;
    ///
    /// let err = Error::invalid_field("email", "missing_field", "email is required");
    /// assert_eq!(err.details().and_then(|d| d["field"].as_str()), Some("email"));
    /// ```
    pub fn invalid_field(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self::invalid_request(message).with_details(json!({ "field": field, "code": code }))
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn duplicate_identity(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateIdentity, message)
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, "invalid_request")]
    #[case(ErrorCode::DuplicateIdentity, "duplicate_identity")]
    #[case(ErrorCode::InvalidCredentials, "invalid_credentials")]
    #[case(ErrorCode::Unauthorized, "unauthorized")]
    #[case(ErrorCode::Forbidden, "forbidden")]
    #[case(ErrorCode::NotFound, "not_found")]
    #[case(ErrorCode::InternalError, "internal_error")]
    fn codes_serialise_in_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
        let value = serde_json::to_value(code).expect("serialise code");
        assert_eq!(value, Value::String(expected.to_owned()));
    }

    #[rstest]
    fn blank_messages_fall_back_to_code_description() {
        let err = Error::new(ErrorCode::InvalidCredentials, "   ");
        assert_eq!(err.message(), "Invalid credentials");
    }

    #[rstest]
    fn trace_id_is_absent_out_of_scope() {
        assert!(Error::internal("boom").trace_id().is_none());
    }

    #[tokio::test]
    async fn captures_trace_id_in_scope() {
        let trace_id = TraceId::from_uuid(Uuid::nil());
        let err = TraceId::scope(trace_id, async { Error::forbidden("nope") }).await;
        assert_eq!(err.trace_id(), Some(Uuid::nil().to_string().as_str()));
    }

    #[rstest]
    fn serialises_camel_case_envelope_without_empty_fields() {
        let err = Error::invalid_field("latitude", "partial_coordinates", "both or neither")
            .with_trace_id("abc");
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(
            value,
            json!({
                "code": "invalid_request",
                "message": "both or neither",
                "traceId": "abc",
                "details": { "field": "latitude", "code": "partial_coordinates" }
            })
        );

        let bare = serde_json::to_value(Error::not_found("missing")).expect("serialise");
        assert!(bare.get("traceId").is_none());
        assert!(bare.get("details").is_none());
    }
}
