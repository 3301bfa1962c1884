//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they depend only on
//! domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, ProjectCommand, ProjectQuery, SessionTokens, SignupService};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub projects_command: Arc<dyn ProjectCommand>,
    pub tokens: Arc<dyn SessionTokens>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub projects_command: Arc<dyn ProjectCommand>,
    /// Verifier consulted by the access gate.
    pub tokens: Arc<dyn SessionTokens>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            signup,
            login,
            projects_query,
            projects_command,
            tokens,
        } = ports;
        Self {
            signup,
            login,
            projects_query,
            projects_command,
            tokens,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
