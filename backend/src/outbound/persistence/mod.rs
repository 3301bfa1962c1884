//! PostgreSQL persistence adapters using Diesel with `diesel-async`.
//!
//! Adapters only translate between row structs and domain types; row
//! structs (`models`) and table definitions (`schema`) never leave this
//! module. Every driver failure is mapped to the owning port's error type.
//!
//! ```ignore
//! use saarthi_backend::outbound::persistence::{DbPool, DieselProjectRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/saarthi")).await?;
//! let projects = DieselProjectRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_error_mapping;
mod diesel_project_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
