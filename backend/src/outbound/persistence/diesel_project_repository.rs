//! PostgreSQL-backed `ProjectRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{
    AccountId, Coordinates, ImageUrl, NewProject, Project, ProjectDraft, ProjectId, ProjectName,
    ProjectStatus, ProjectUpdate, ProjectValidationError, Sector, VillageName,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewProjectRow, ProjectChangeset, ProjectRow};
use super::pool::DbPool;
use super::schema::projects;

/// Diesel implementation of the project store.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> ProjectRepositoryError {
    map_diesel_error(
        error,
        ProjectRepositoryError::query,
        ProjectRepositoryError::connection,
    )
}

fn coordinates_columns(draft: &ProjectDraft) -> (Option<f64>, Option<f64>) {
    draft
        .coordinates
        .map_or((None, None), |c| (Some(c.latitude()), Some(c.longitude())))
}

fn row_to_project(row: ProjectRow) -> Result<Project, ProjectRepositoryError> {
    let id = row.id;
    let invalid = |err: ProjectValidationError| {
        ProjectRepositoryError::query(format!("stored project {id} is invalid: {err}"))
    };
    let coordinates = match (row.latitude, row.longitude) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon).map_err(invalid)?),
        (None, None) => None,
        _ => return Err(invalid(ProjectValidationError::PartialCoordinates)),
    };
    Ok(Project {
        id: ProjectId::from_uuid(row.id),
        project_name: ProjectName::new(&row.project_name).map_err(invalid)?,
        sector: Sector::new(&row.sector).map_err(invalid)?,
        status: row.status.parse::<ProjectStatus>().map_err(invalid)?,
        village_name: VillageName::new(&row.village_name).map_err(invalid)?,
        coordinates,
        image_url: row.image_url.map(ImageUrl::new),
        created_by: AccountId::from_uuid(row.created_by),
        created_at: row.created_at,
    })
}

fn rows_to_projects(rows: Vec<ProjectRow>) -> Result<Vec<Project>, ProjectRepositoryError> {
    rows.into_iter().map(row_to_project).collect()
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn list_recent(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProjectRepositoryError::connection))?;

        let rows = projects::table
            .order(projects::created_at.desc())
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;
        rows_to_projects(rows)
    }

    async fn top_completed_in_village(
        &self,
        village: &VillageName,
        limit: usize,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProjectRepositoryError::connection))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = projects::table
            .filter(projects::village_name.eq(village.as_ref()))
            .filter(projects::status.eq(ProjectStatus::Completed.as_str()))
            .order(projects::created_at.desc())
            .limit(limit)
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;
        rows_to_projects(rows)
    }

    async fn insert(&self, project: &NewProject) -> Result<Project, ProjectRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProjectRepositoryError::connection))?;

        let (latitude, longitude) = coordinates_columns(&project.draft);
        let row = NewProjectRow {
            id: *project.id.as_uuid(),
            project_name: project.draft.project_name.as_ref(),
            sector: project.draft.sector.as_ref(),
            status: project.draft.status.as_str(),
            village_name: project.draft.village_name.as_ref(),
            latitude,
            longitude,
            image_url: project.image_url.as_ref().map(AsRef::as_ref),
            created_by: *project.created_by.as_uuid(),
            created_at: project.created_at,
        };
        let stored = diesel::insert_into(projects::table)
            .values(&row)
            .returning(ProjectRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;
        row_to_project(stored)
    }

    async fn update(
        &self,
        id: &ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProjectRepositoryError::connection))?;

        let (latitude, longitude) = coordinates_columns(&update.draft);
        let changeset = ProjectChangeset {
            project_name: update.draft.project_name.as_ref(),
            sector: update.draft.sector.as_ref(),
            status: update.draft.status.as_str(),
            village_name: update.draft.village_name.as_ref(),
            latitude,
            longitude,
        };
        let target = diesel::update(projects::table.find(*id.as_uuid()));
        let updated = match &update.image_url {
            Some(url) => {
                target
                    .set((&changeset, projects::image_url.eq(url.as_ref())))
                    .returning(ProjectRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            None => {
                target
                    .set(&changeset)
                    .returning(ProjectRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
        }
        .optional()
        .map_err(map_error)?;

        updated.map(row_to_project).transpose()
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProjectRepositoryError::connection))?;

        let deleted = diesel::delete(projects::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn row() -> ProjectRow {
        ProjectRow {
            id: Uuid::new_v4(),
            project_name: "Well".into(),
            sector: "Water".into(),
            status: "Completed".into(),
            village_name: "V1".into(),
            latitude: Some(12.5),
            longitude: Some(77.5),
            image_url: Some("/uploads/a.jpg".into()),
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn converts_complete_rows(row: ProjectRow) {
        let project = row_to_project(row).expect("valid row");
        assert_eq!(project.status, ProjectStatus::Completed);
        assert_eq!(project.coordinates.map(|c| c.latitude()), Some(12.5));
    }

    #[rstest]
    fn rejects_half_null_coordinates(row: ProjectRow) {
        let err = row_to_project(ProjectRow {
            longitude: None,
            ..row
        })
        .expect_err("partial coordinates");
        assert!(matches!(err, ProjectRepositoryError::Query { .. }));
    }

    #[rstest]
    fn rejects_unknown_status(row: ProjectRow) {
        let err = row_to_project(ProjectRow {
            status: "Stalled".into(),
            ..row
        })
        .expect_err("bad status");
        assert!(err.to_string().contains("status"));
    }
}
