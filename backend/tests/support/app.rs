//! Application harness shared by the HTTP integration suites.
//!
//! Wires the real services over in-memory stores, a low-cost bcrypt hasher and
//! a temporary upload directory, so requests exercise every layer except
//! PostgreSQL.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::TimeDelta;
use mockable::DefaultClock;
use saarthi_backend::Trace;
use saarthi_backend::domain::ports::{
    LoginService, ProjectCommand, ProjectQuery, SessionTokens, SignupService,
};
use saarthi_backend::domain::{AuthService, ProjectService};
use saarthi_backend::inbound::http::state::{HttpState, HttpStatePorts};
use saarthi_backend::inbound::http::{configure_api, json_config, multipart_config};
use saarthi_backend::outbound::crypto::BcryptPasswordHasher;
use saarthi_backend::outbound::memory::{InMemoryAccountRepository, InMemoryProjectRepository};
use saarthi_backend::outbound::token::JwtSessionTokens;
use saarthi_backend::outbound::uploads::FsImageStore;
use serde_json::Value;
use tempfile::TempDir;

const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";
const TEST_BCRYPT_COST: u32 = 4;
const MAX_UPLOAD_BYTES: usize = 1024 * 1024;
pub const BOUNDARY: &str = "saarthi-integration-boundary";

pub struct TestApp {
    pub state: web::Data<HttpState>,
    pub uploads: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let uploads = tempfile::tempdir().expect("upload dir");
        let images = Arc::new(FsImageStore::open(uploads.path()).expect("image store"));
        let clock = Arc::new(DefaultClock);
        let tokens = Arc::new(JwtSessionTokens::new(
            TEST_SECRET,
            TimeDelta::hours(12),
            clock.clone(),
        ));
        let auth = Arc::new(AuthService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST)),
            tokens.clone(),
        ));
        let projects = Arc::new(ProjectService::new(
            Arc::new(InMemoryProjectRepository::new()),
            images,
            clock,
        ));
        let state = HttpState::new(HttpStatePorts {
            signup: auth.clone() as Arc<dyn SignupService>,
            login: auth as Arc<dyn LoginService>,
            projects_query: projects.clone() as Arc<dyn ProjectQuery>,
            projects_command: projects as Arc<dyn ProjectCommand>,
            tokens: tokens as Arc<dyn SessionTokens>,
        });
        Self {
            state: web::Data::new(state),
            uploads,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .app_data(json_config())
            .app_data(multipart_config(MAX_UPLOAD_BYTES))
            .configure(configure_api)
            .wrap(Trace)
    }

    /// Dispatch `request` through a fresh service over the shared state and
    /// decode the JSON body (`Value::Null` when empty).
    pub async fn send(&self, request: test::TestRequest) -> (StatusCode, Value) {
        let service = test::init_service(self.app()).await;
        let response = test::call_service(&service, request.to_request()).await;
        let status = response.status();
        let bytes = test::read_body(response).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    /// Register an account and log it in, returning the bearer token and the
    /// account id.
    pub async fn signed_in(&self, name: &str, email: &str, role: &str) -> (String, String) {
        let (status, body) = self
            .send(test::TestRequest::post().uri("/api/auth/signup").set_json(
                serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": "correct horse",
                    "role": role,
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");
        let (status, body) = self
            .send(test::TestRequest::post().uri("/api/auth/login").set_json(
                serde_json::json!({"email": email, "password": "correct horse"}),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        let token = body["token"].as_str().expect("token").to_owned();
        let id = body["user"]["id"].as_str().expect("user id").to_owned();
        (token, id)
    }
}

/// Attach a bearer token and a multipart project form to `method`.
pub fn project_form(
    method: test::TestRequest,
    token: &str,
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> test::TestRequest {
    method
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header(("Content-Type", multipart_content_type()))
        .set_payload(multipart_body(fields, image))
}

/// Encode text fields and an optional image as `multipart/form-data`.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
