//! Role-based access policy.
//!
//! Every guarded operation appears exactly once in [`Operation::requirement`];
//! the HTTP gate consults this table after a token verifies, so handlers never
//! hand-roll role checks.

use super::{Error, Identity, Role};

/// Operations exposed over the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListProjects,
    TopCompletedInVillage,
    CreateProject,
    UpdateProject,
    DeleteProject,
    ProjectSummary,
}

/// Who may perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// No token needed.
    Public,
    /// A verified token whose role is in the list.
    Roles(&'static [Role]),
}

impl Operation {
    pub const fn requirement(self) -> Requirement {
        match self {
            Self::ListProjects | Self::TopCompletedInVillage => Requirement::Public,
            Self::CreateProject => Requirement::Roles(&[Role::Officer]),
            Self::UpdateProject => Requirement::Roles(&[Role::Officer, Role::Admin]),
            Self::DeleteProject | Self::ProjectSummary => Requirement::Roles(&[Role::Admin]),
        }
    }
}

/// Check that `identity` may perform `operation`.
///
/// # Examples
/// ```
/// use saarthi_backend::domain::{AccountId, AccountName, Identity, Operation, Role, authorize};
///
/// let officer = Identity {
///     account_id: AccountId::random(),
///     role: Role::Officer,
///     name: AccountName::new("Asha").unwrap(),
/// };
/// assert!(authorize(&officer, Operation::CreateProject).is_ok());
/// assert!(authorize(&officer, Operation::DeleteProject).is_err());
/// ```
pub fn authorize(identity: &Identity, operation: Operation) -> Result<(), Error> {
    match operation.requirement() {
        Requirement::Public => Ok(()),
        Requirement::Roles(roles) if roles.contains(&identity.role) => Ok(()),
        Requirement::Roles(_) => Err(Error::forbidden(format!(
            "role {} may not perform this operation",
            identity.role
        ))),
    }
}
