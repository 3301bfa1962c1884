//! Domain primitives, policy and services.
//!
//! Types here are transport agnostic: validated value objects for accounts
//! and projects, the access policy table, the error taxonomy, the ports the
//! services depend on and the services themselves.

pub mod access;
pub mod account;
pub mod auth;
pub mod auth_service;
pub mod error;
pub mod ports;
pub mod project;
pub mod project_service;
pub mod session;
pub mod summary;
pub mod trace_id;

pub use self::access::{Operation, Requirement, authorize};
pub use self::account::{
    ACCOUNT_NAME_MAX, Account, AccountId, AccountName, AccountValidationError, Email,
    NewAccount, PasswordHash, Role, StoredAccount,
};
pub use self::auth::{
    CredentialsValidationError, LoginCredentials, PASSWORD_MAX_BYTES, Registration,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode};
pub use self::project::{
    Coordinates, ImageUrl, NewProject, Project, ProjectDraft, ProjectDraftParts, ProjectId,
    ProjectName, ProjectStatus, ProjectUpdate, ProjectValidationError, Sector, VillageName,
};
pub use self::project_service::ProjectService;
pub use self::session::{Identity, IssuedToken};
pub use self::summary::{ProjectSummary, SectorCount};
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
