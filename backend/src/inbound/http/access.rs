//! Bearer-token access gate.
//!
//! Handlers name the operation they perform in their signature, for example
//! `Authorized<DeleteProject>`. The extractor verifies the token (401 on any
//! failure) and then checks the role against the policy table in
//! [`crate::domain::access`] (403), before the handler body or request payload
//! is touched.

use std::marker::PhantomData;

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, Identity, Operation, authorize};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Marker for a guarded API operation.
pub trait GuardedOperation {
    const OPERATION: Operation;
}

macro_rules! guarded_operations {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Marker for [`Operation::", stringify!($name), "`].")]
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl GuardedOperation for $name {
                const OPERATION: Operation = Operation::$name;
            }
        )+
    };
}

guarded_operations!(CreateProject, UpdateProject, DeleteProject, ProjectSummary);

/// Identity that passed both authentication and the role check for `O`.
#[derive(Debug, Clone)]
pub struct Authorized<O> {
    identity: Identity,
    operation: PhantomData<O>,
}

impl<O> Authorized<O> {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn into_identity(self) -> Identity {
        self.identity
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() {
        return Err(Error::unauthorized("malformed authorization header"));
    }
    Ok(token)
}

fn gate(req: &HttpRequest, operation: Operation) -> Result<Identity, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    let token = bearer_token(req.headers())?;
    let identity = state.tokens.verify(token).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::unauthorized("invalid or expired token")
    })?;
    authorize(&identity, operation)?;
    Ok(identity)
}

impl<O: GuardedOperation> FromRequest for Authorized<O> {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(gate(req, O::OPERATION).map(|identity| Self {
            identity,
            operation: PhantomData,
        }))
    }
}
