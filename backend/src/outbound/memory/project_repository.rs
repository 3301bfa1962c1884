//! In-memory `ProjectRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{NewProject, Project, ProjectId, ProjectStatus, ProjectUpdate, VillageName};

use super::lock;

/// Projects held in insertion order; reads sort newest first.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<Vec<Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut projects: Vec<Project>) -> Vec<Project> {
    // Reversed first so equal timestamps keep the latest insert ahead.
    projects.reverse();
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    projects
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn list_recent(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let projects = lock(&self.projects, ProjectRepositoryError::query)?;
        Ok(newest_first(projects.clone()))
    }

    async fn top_completed_in_village(
        &self,
        village: &VillageName,
        limit: usize,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let projects = lock(&self.projects, ProjectRepositoryError::query)?;
        let matching = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed && &p.village_name == village)
            .cloned()
            .collect();
        Ok(newest_first(matching).into_iter().take(limit).collect())
    }

    async fn insert(&self, project: &NewProject) -> Result<Project, ProjectRepositoryError> {
        let mut projects = lock(&self.projects, ProjectRepositoryError::query)?;
        let stored = project.clone().into_project();
        projects.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut projects = lock(&self.projects, ProjectRepositoryError::query)?;
        Ok(projects.iter_mut().find(|p| p.id == *id).map(|project| {
            update.apply_to(project);
            project.clone()
        }))
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut projects = lock(&self.projects, ProjectRepositoryError::query)?;
        let before = projects.len();
        projects.retain(|p| p.id != *id);
        Ok(projects.len() != before)
    }
}
