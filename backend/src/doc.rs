//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers every REST path and the bearer-token security scheme.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::inbound::http::projects::{
    DeleteResponse, ProjectFormSchema, ProjectResponse, ProjectsResponse, SummaryResponse,
};
use crate::inbound::http::schemas::{AccountBody, ProjectBody, SectorCountBody, SummaryBody};

pub const BEARER_SCHEME_NAME: &str = "BearerToken";

/// Adds the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            BEARER_SCHEME_NAME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Saarthi backend API",
        description = "Project monitoring: officer submissions, admin dashboard and public transparency map."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::top_completed_in_village,
        crate::inbound::http::projects::project_summary,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        AccountBody,
        ProjectBody,
        SectorCountBody,
        SummaryBody,
        SignupRequest,
        SignupResponse,
        LoginRequest,
        LoginResponse,
        ProjectFormSchema,
        ProjectsResponse,
        ProjectResponse,
        SummaryResponse,
        DeleteResponse,
    )),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "projects", description = "Project records"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
