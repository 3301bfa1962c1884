//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories for development and tests
//! - **crypto**: bcrypt password hashing
//! - **token**: HS256 JWT session tokens
//! - **uploads**: filesystem photo storage
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business rules.

pub mod crypto;
pub mod memory;
pub mod persistence;
pub mod token;
pub mod uploads;
