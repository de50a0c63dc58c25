//! Port abstraction for shelter persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Shelter, ShelterId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by shelter repository adapters.
    pub enum ShelterPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "shelter repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "shelter repository query failed: {message}",
    }
}

/// Driven port over the shelter record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShelterRepository: Send + Sync {
    /// Insert a new shelter record.
    async fn insert(&self, shelter: &Shelter) -> Result<(), ShelterPersistenceError>;

    /// Fetch a shelter by identifier.
    async fn find_by_id(&self, id: &ShelterId) -> Result<Option<Shelter>, ShelterPersistenceError>;

    /// Every stored shelter ordered by name, then id.
    async fn list_all(&self) -> Result<Vec<Shelter>, ShelterPersistenceError>;

    /// Replace the record with the same id. Returns `false` if it is absent.
    async fn update(&self, shelter: &Shelter) -> Result<bool, ShelterPersistenceError>;

    /// Delete by id. Returns `false` if nothing was removed.
    async fn delete(&self, id: &ShelterId) -> Result<bool, ShelterPersistenceError>;
}
