//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod auth_service;
mod image_store;
mod password_hasher;
mod project_repository;
mod project_service;
mod session_tokens;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use auth_service::{MockLoginService, MockSignupService};
pub use auth_service::{LoginOutcome, LoginService, SignupService};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use image_store::{ImageStore, ImageStoreError, ImageUpload};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectRepositoryError};
#[cfg(test)]
pub use project_service::{MockProjectCommand, MockProjectQuery};
pub use project_service::{ProjectCommand, ProjectQuery, TOP_COMPLETED_LIMIT};
#[cfg(test)]
pub use session_tokens::MockSessionTokens;
pub use session_tokens::{SessionTokenError, SessionTokens};
