//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use saarthi_backend::ApiDoc;
use saarthi_backend::Trace;
use saarthi_backend::inbound::http::health::{HealthState, live, ready};
use saarthi_backend::inbound::http::state::HttpState;
use saarthi_backend::inbound::http::{configure_api, json_config, multipart_config};
use saarthi_backend::outbound::uploads::{FsImageStore, UPLOADS_ROUTE};

use state_builders::build_http_state;

const CORS_MAX_AGE_SECS: usize = 3600;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    images: Arc<FsImageStore>,
    max_upload_bytes: usize,
    cors_origins: Arc<[String]>,
}

fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::HeaderName::from_static(
            saarthi_backend::domain::TRACE_ID_HEADER,
        )])
        .max_age(CORS_MAX_AGE_SECS)
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        images,
        max_upload_bytes,
        cors_origins,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(multipart_config(max_upload_bytes))
        .configure(configure_api)
        .service(Files::new(UPLOADS_ROUTE, images.root()))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.wrap(Trace).wrap(cors(&cors_origins))
}

/// Construct the Actix HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when the upload directory cannot be opened or
/// the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let images = Arc::new(FsImageStore::open(&config.upload_dir)?);
    let http_state = web::Data::new(build_http_state(&config, Arc::clone(&images)));
    let store = if config.db_pool.is_some() {
        "postgres"
    } else {
        "in-memory"
    };

    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        images,
        max_upload_bytes: config.max_upload_bytes,
        cors_origins: config.cors_origins.into(),
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();

    info!(
        bind_addr = %config.bind_addr,
        store,
        upload_dir = %config.upload_dir.display(),
        "server listening"
    );
    health_state.mark_ready();
    Ok(server)
}
