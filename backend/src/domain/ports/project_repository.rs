//! Port for project persistence.
//!
//! Each method maps to a single statement so adapters inherit statement-level
//! atomicity from the store.

use async_trait::async_trait;

use crate::domain::{NewProject, Project, ProjectId, ProjectUpdate, VillageName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Every project, newest first.
    async fn list_recent(&self) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Up to `limit` completed projects in `village`, newest first.
    async fn top_completed_in_village(
        &self,
        village: &VillageName,
        limit: usize,
    ) -> Result<Vec<Project>, ProjectRepositoryError>;

    async fn insert(&self, project: &NewProject) -> Result<Project, ProjectRepositoryError>;

    /// Apply `update` and return the stored row, or `None` for an unknown id.
    async fn update(
        &self,
        id: &ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Returns `true` when a row was deleted.
    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError>;
}
