//! Driving port for shelter reads and proximity search.

use async_trait::async_trait;

use crate::domain::{Error, NearbyQuery, NearbyShelter, Shelter, ShelterId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShelterQuery: Send + Sync {
    /// All shelters ordered by name, then id.
    async fn list(&self) -> Result<Vec<Shelter>, Error>;

    async fn get(&self, id: &ShelterId) -> Result<Shelter, Error>;

    /// Shelters within the query radius, nearest first.
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyShelter>, Error>;
}
