//! Driving ports for project reads and mutations.

use async_trait::async_trait;

use crate::domain::{
    Error, Identity, Project, ProjectDraft, ProjectId, ProjectSummary, VillageName,
};

use super::ImageUpload;

/// Number of projects returned by the village highlight query.
pub const TOP_COMPLETED_LIMIT: usize = 3;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectQuery: Send + Sync {
    /// Every project, newest first.
    async fn list(&self) -> Result<Vec<Project>, Error>;

    /// The most recent completed projects in `village`, at most
    /// [`TOP_COMPLETED_LIMIT`].
    async fn top_completed(&self, village: &VillageName) -> Result<Vec<Project>, Error>;

    /// Dashboard totals.
    async fn summary(&self) -> Result<ProjectSummary, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCommand: Send + Sync {
    /// Record a project created by `creator`.
    async fn create(
        &self,
        creator: &Identity,
        draft: ProjectDraft,
        image: Option<ImageUpload>,
    ) -> Result<Project, Error>;

    /// Replace the project's fields; the photo changes only when `image` is
    /// supplied. Unknown ids fail with `not_found`.
    async fn update(
        &self,
        id: &ProjectId,
        draft: ProjectDraft,
        image: Option<ImageUpload>,
    ) -> Result<Project, Error>;

    /// Delete the project. Deleting an unknown id succeeds.
    async fn delete(&self, id: &ProjectId) -> Result<(), Error>;
}
