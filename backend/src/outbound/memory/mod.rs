//! In-process repositories used when no database is configured.
//!
//! State lives behind a `std::sync::Mutex`; every operation completes under a
//! single lock acquisition, so uniqueness checks and writes are atomic with
//! respect to each other. Locks are never held across an `.await`.

mod shelter_repository;
mod user_repository;

pub use shelter_repository::InMemoryShelterRepository;
pub use user_repository::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Every mutation is a single map operation; poisoned state is consistent.
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
