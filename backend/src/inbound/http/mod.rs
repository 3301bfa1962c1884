//! HTTP inbound adapter exposing the REST endpoints.

pub mod access;
pub mod auth;
pub mod error;
pub mod health;
pub mod projects;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;

pub use error::ApiResult;

use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::domain::Error;

/// Multipart text parts are small; only the photo may be large.
const MULTIPART_MEMORY_LIMIT: usize = 64 * 1024;

/// JSON extractor configuration reporting malformed bodies with the shared
/// error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into())
}

/// Multipart extractor configuration capping the total upload size.
pub fn multipart_config(max_upload_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_upload_bytes)
        .memory_limit(MULTIPART_MEMORY_LIMIT)
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into())
}

/// Register the `/api` routes. `/projects/summary` precedes `/projects/{id}`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(auth::signup)
            .service(auth::login)
            .service(projects::list_projects)
            .service(projects::project_summary)
            .service(projects::top_completed_in_village)
            .service(projects::create_project)
            .service(projects::update_project)
            .service(projects::delete_project),
    );
}
