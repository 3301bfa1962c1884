//! Saarthi project-monitoring backend.
//!
//! Hexagonal layout: [`domain`] holds validated types, the access policy and
//! the services; [`inbound::http`] adapts them to Actix Web; [`outbound`]
//! provides PostgreSQL, in-memory, bcrypt, JWT and filesystem adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
