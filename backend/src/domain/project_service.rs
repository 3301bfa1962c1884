//! Project services implementing the read and write driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    ImageStore, ImageStoreError, ImageUpload, ProjectCommand, ProjectQuery, ProjectRepository,
    ProjectRepositoryError, TOP_COMPLETED_LIMIT,
};
use crate::domain::{
    Error, Identity, ImageUrl, NewProject, Project, ProjectDraft, ProjectId, ProjectSummary,
    ProjectUpdate, VillageName,
};

/// Project service backed by a repository and an image store.
#[derive(Clone)]
pub struct ProjectService<P, I> {
    projects: Arc<P>,
    images: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<P, I> ProjectService<P, I> {
    pub fn new(projects: Arc<P>, images: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects,
            images,
            clock,
        }
    }
}

impl<P, I> ProjectService<P, I>
where
    P: ProjectRepository,
    I: ImageStore,
{
    fn map_repository_error(error: ProjectRepositoryError) -> Error {
        match error {
            ProjectRepositoryError::Connection { message } => {
                Error::internal(format!("project repository unavailable: {message}"))
            }
            ProjectRepositoryError::Query { message } => {
                Error::internal(format!("project repository error: {message}"))
            }
        }
    }

    fn map_image_error(error: ImageStoreError) -> Error {
        Error::internal(error.to_string())
    }

    async fn store_image(&self, image: Option<ImageUpload>) -> Result<Option<ImageUrl>, Error> {
        match image {
            Some(upload) => self
                .images
                .store(&upload)
                .await
                .map(Some)
                .map_err(Self::map_image_error),
            None => Ok(None),
        }
    }

    /// Drop a freshly stored image whose project write did not happen.
    async fn discard_image(&self, image_url: Option<&ImageUrl>) {
        let Some(url) = image_url else { return };
        if let Err(err) = self.images.remove(url).await {
            warn!(image_url = %url.as_ref(), error = %err, "failed to discard orphaned image");
        }
    }
}

#[async_trait]
impl<P, I> ProjectQuery for ProjectService<P, I>
where
    P: ProjectRepository,
    I: ImageStore,
{
    async fn list(&self) -> Result<Vec<Project>, Error> {
        self.projects
            .list_recent()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn top_completed(&self, village: &VillageName) -> Result<Vec<Project>, Error> {
        self.projects
            .top_completed_in_village(village, TOP_COMPLETED_LIMIT)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn summary(&self) -> Result<ProjectSummary, Error> {
        let projects = self.list().await?;
        Ok(ProjectSummary::from_projects(&projects))
    }
}

#[async_trait]
impl<P, I> ProjectCommand for ProjectService<P, I>
where
    P: ProjectRepository,
    I: ImageStore,
{
    async fn create(
        &self,
        creator: &Identity,
        draft: ProjectDraft,
        image: Option<ImageUpload>,
    ) -> Result<Project, Error> {
        let image_url = self.store_image(image).await?;
        let new_project = NewProject {
            id: ProjectId::random(),
            draft,
            image_url,
            created_by: creator.account_id,
            created_at: self.clock.utc(),
        };
        let project = match self.projects.insert(&new_project).await {
            Ok(project) => project,
            Err(err) => {
                self.discard_image(new_project.image_url.as_ref()).await;
                return Err(Self::map_repository_error(err));
            }
        };
        info!(project_id = %project.id, created_by = %project.created_by, "project created");
        Ok(project)
    }

    async fn update(
        &self,
        id: &ProjectId,
        draft: ProjectDraft,
        image: Option<ImageUpload>,
    ) -> Result<Project, Error> {
        let image_url = self.store_image(image).await?;
        let update = ProjectUpdate { draft, image_url };
        let stored = self
            .projects
            .update(id, &update)
            .await
            .map_err(Self::map_repository_error)
            .and_then(|found| found.ok_or_else(|| Error::not_found("Not found")));
        let project = match stored {
            Ok(project) => project,
            Err(err) => {
                self.discard_image(update.image_url.as_ref()).await;
                return Err(err);
            }
        };
        info!(project_id = %project.id, "project updated");
        Ok(project)
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), Error> {
        let deleted = self
            .projects
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        info!(project_id = %id, deleted, "project delete requested");
        Ok(())
    }
}
