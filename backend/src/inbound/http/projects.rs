//! Project handlers.
//!
//! ```text
//! GET    /api/projects
//! GET    /api/projects/village/{village}
//! GET    /api/projects/summary            (admin)
//! POST   /api/projects                    (officer, multipart)
//! PUT    /api/projects/{id}               (officer, admin; multipart)
//! DELETE /api/projects/{id}               (admin)
//! ```

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::ImageUpload;
use crate::domain::{Error, Project, ProjectDraft, ProjectDraftParts, ProjectId, VillageName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::{self, Authorized};
use crate::inbound::http::schemas::{ProjectBody, SummaryBody};
use crate::inbound::http::state::HttpState;

/// Multipart project form. Text parts are optional so that missing fields
/// surface as validation errors naming the field.
#[derive(Debug, MultipartForm)]
pub struct ProjectForm {
    pub project_name: Option<Text<String>>,
    pub sector: Option<Text<String>>,
    pub status: Option<Text<String>>,
    pub village_name: Option<Text<String>>,
    pub latitude: Option<Text<String>>,
    pub longitude: Option<Text<String>>,
    pub image: Option<TempFile>,
}

fn text(field: &Option<Text<String>>) -> Option<&str> {
    field.as_ref().map(|value| value.0.as_str())
}

impl ProjectForm {
    fn draft(&self) -> Result<ProjectDraft, Error> {
        let parts = ProjectDraftParts {
            project_name: text(&self.project_name),
            sector: text(&self.sector),
            status: text(&self.status),
            village_name: text(&self.village_name),
            latitude: text(&self.latitude),
            longitude: text(&self.longitude),
        };
        Ok(ProjectDraft::try_from_parts(parts)?)
    }

    /// Browsers send an empty part when no file was chosen.
    fn image(&self) -> Option<ImageUpload> {
        self.image
            .as_ref()
            .filter(|file| file.size > 0)
            .map(|file| ImageUpload {
                path: file.file.path().to_path_buf(),
                file_name: file.file_name.clone(),
            })
    }
}

/// OpenAPI description of [`ProjectForm`].
#[derive(ToSchema)]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct ProjectFormSchema {
    #[schema(example = "Community well")]
    project_name: String,
    #[schema(example = "Water")]
    sector: String,
    #[schema(example = "Ongoing")]
    status: String,
    #[schema(example = "Rampur")]
    village_name: String,
    latitude: Option<String>,
    longitude: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectBody>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub project: ProjectBody,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: SummaryBody,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

fn projects_response(projects: &[Project]) -> web::Json<ProjectsResponse> {
    web::Json(ProjectsResponse {
        projects: projects.iter().map(ProjectBody::from).collect(),
    })
}

fn project_response(project: &Project) -> web::Json<ProjectResponse> {
    web::Json(ProjectResponse {
        project: ProjectBody::from(project),
    })
}

/// List every project, newest first.
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Projects", body = ProjectsResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "listProjects",
    security([])
)]
#[get("/projects")]
pub async fn list_projects(state: web::Data<HttpState>) -> ApiResult<web::Json<ProjectsResponse>> {
    let projects = state.projects_query.list().await?;
    Ok(projects_response(&projects))
}

/// The three most recent completed projects in a village. A name no project
/// could carry matches nothing.
#[utoipa::path(
    get,
    path = "/api/projects/village/{village}",
    params(("village" = String, Path, description = "Village name")),
    responses(
        (status = 200, description = "Completed projects", body = ProjectsResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "topCompletedInVillage",
    security([])
)]
#[get("/projects/village/{village}")]
pub async fn top_completed_in_village(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectsResponse>> {
    let Ok(village) = VillageName::new(path.into_inner()) else {
        debug!("village name cannot match any project");
        return Ok(projects_response(&[]));
    };
    let projects = state.projects_query.top_completed(&village).await?;
    Ok(projects_response(&projects))
}

/// Dashboard totals for administrators.
#[utoipa::path(
    get,
    path = "/api/projects/summary",
    responses(
        (status = 200, description = "Summary", body = SummaryResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "projectSummary"
)]
#[get("/projects/summary")]
pub async fn project_summary(
    _caller: Authorized<access::ProjectSummary>,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<SummaryResponse>> {
    let summary = state.projects_query.summary().await?;
    Ok(web::Json(SummaryResponse {
        summary: SummaryBody::from(&summary),
    }))
}

/// Record a new project for the calling officer.
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body(content = ProjectFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    caller: Authorized<access::CreateProject>,
    state: web::Data<HttpState>,
    form: MultipartForm<ProjectForm>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let draft = form.draft()?;
    let project = state
        .projects_command
        .create(caller.identity(), draft, form.image())
        .await?;
    Ok(project_response(&project))
}

/// Replace a project's fields; the photo changes only when a new one is sent.
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id (UUID)")),
    request_body(content = ProjectFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[put("/projects/{id}")]
pub async fn update_project(
    _caller: Authorized<access::UpdateProject>,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: MultipartForm<ProjectForm>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let id: ProjectId = path.parse()?;
    let draft = form.draft()?;
    let project = state
        .projects_command
        .update(&id, draft, form.image())
        .await?;
    Ok(project_response(&project))
}

/// Delete a project. Unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id (UUID)")),
    responses(
        (status = 200, description = "Deleted", body = DeleteResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    _caller: Authorized<access::DeleteProject>,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id: ProjectId = path.parse()?;
    state.projects_command.delete(&id).await?;
    Ok(web::Json(DeleteResponse { success: true }))
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
