//! Signup and login handlers.
//!
//! ```text
//! POST /api/auth/signup {"name":"Asha","email":"asha@example.org","password":"secret","role":"officer"}
//! POST /api/auth/login {"email":"asha@example.org","password":"secret"}
//! ```

use actix_web::{post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::AccountBody;
use crate::inbound::http::state::HttpState;

/// Signup request body. Fields are optional on the wire so that a missing
/// field is reported as a validation error naming it.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[schema(example = "officer")]
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub user: AccountBody,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AccountBody,
}

/// Register an officer or admin account.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = SignupResponse),
        (status = 400, description = "Missing fields or duplicate email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<SignupResponse>> {
    let body = payload.into_inner();
    let registration = Registration::try_from_parts(
        body.name.as_deref(),
        body.email.as_deref(),
        body.password.as_deref(),
        body.role.as_deref(),
    )?;
    let account = state.signup.signup(&registration).await?;
    Ok(web::Json(SignupResponse {
        user: AccountBody::from(&account),
    }))
}

/// Exchange credentials for a signed session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let body = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(body.email.as_deref(), body.password.as_deref())?;
    let outcome = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        token: outcome.token.token,
        expires_at: outcome.token.expires_at,
        user: AccountBody::from(&outcome.account),
    }))
}
