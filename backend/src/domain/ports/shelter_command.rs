//! Driving port for shelter mutations.

use async_trait::async_trait;

use crate::domain::{Error, Shelter, ShelterFields, ShelterId, ShelterPatch};

/// Domain use-case port for creating, replacing, patching and deleting
/// shelters. Inputs are raw fields; validation happens behind the port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShelterCommand: Send + Sync {
    async fn create(&self, fields: ShelterFields) -> Result<Shelter, Error>;

    /// Full replacement of the client-controlled fields.
    async fn replace(&self, id: &ShelterId, fields: ShelterFields) -> Result<Shelter, Error>;

    /// Change only the supplied fields.
    async fn patch(&self, id: &ShelterId, patch: ShelterPatch) -> Result<Shelter, Error>;

    async fn delete(&self, id: &ShelterId) -> Result<(), Error>;
}
