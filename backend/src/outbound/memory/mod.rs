//! In-process store adapters.
//!
//! Used when no database URL is configured (development builds only) and by
//! HTTP integration tests. State lives for the life of the process.

mod account_repository;
mod project_repository;

pub use account_repository::InMemoryAccountRepository;
pub use project_repository::InMemoryProjectRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock `mutex`, turning poisoning into an adapter error via `poisoned`.
fn lock<'a, T, E>(
    mutex: &'a Mutex<T>,
    poisoned: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    mutex
        .lock()
        .map_err(|_| poisoned("in-memory store lock poisoned".to_owned()))
}
