//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, MockLoginService, MockProjectCommand, MockProjectQuery, MockSessionTokens,
    MockSignupService, ProjectCommand, ProjectQuery, SessionTokens, SignupService,
};
use crate::domain::{AccountId, AccountName, Identity, Role};

use super::state::{HttpState, HttpStatePorts};

pub const MULTIPART_BOUNDARY: &str = "saarthi-test-boundary";

/// Ports for handler tests. Defaults are mocks without expectations, so any
/// unexpected call fails the test.
pub struct TestPorts {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub projects_command: Arc<dyn ProjectCommand>,
    pub tokens: Arc<dyn SessionTokens>,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            signup: Arc::new(MockSignupService::new()),
            login: Arc::new(MockLoginService::new()),
            projects_query: Arc::new(MockProjectQuery::new()),
            projects_command: Arc::new(MockProjectCommand::new()),
            tokens: Arc::new(MockSessionTokens::new()),
        }
    }
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            signup: self.signup,
            login: self.login,
            projects_query: self.projects_query,
            projects_command: self.projects_command,
            tokens: self.tokens,
        })
    }
}

pub fn identity(role: Role) -> Identity {
    Identity {
        account_id: AccountId::random(),
        role,
        name: AccountName::new("Test User").expect("valid name"),
    }
}

/// Token verifier accepting `Bearer <role>` for `officer` and `admin`, and
/// resolving both to `who`'s account id.
pub fn role_tokens(who: AccountId) -> MockSessionTokens {
    let mut tokens = MockSessionTokens::new();
    tokens.expect_verify().returning(move |token| {
        let role = token
            .parse::<Role>()
            .map_err(|_| crate::domain::ports::SessionTokenError::invalid())?;
        Ok(Identity {
            account_id: who,
            ..identity(role)
        })
    });
    tokens
}

/// Encode text fields and an optional file as `multipart/form-data`.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
}
