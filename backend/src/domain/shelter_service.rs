//! Shelter catalogue service.
//!
//! Implements both shelter driving ports. The service owns validation and
//! server-managed timestamps; repositories only store what they are given.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::geo::rank_nearby;
use crate::domain::ports::{ShelterCommand, ShelterQuery, ShelterRepository};
use crate::domain::repository_errors::map_shelter_persistence_error;
use crate::domain::{
    Error, NearbyQuery, NearbyShelter, Shelter, ShelterDraft, ShelterFields, ShelterId,
    ShelterPatch, ShelterValidationError,
};

#[derive(Clone)]
pub struct ShelterService<R> {
    shelters: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ShelterService<R> {
    pub fn new(shelters: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { shelters, clock }
    }
}

fn invalid_shelter(error: ShelterValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

fn shelter_not_found(id: &ShelterId) -> Error {
    Error::not_found(format!("shelter {id} not found"))
}

impl<R> ShelterService<R>
where
    R: ShelterRepository,
{
    async fn load(&self, id: &ShelterId) -> Result<Shelter, Error> {
        self.shelters
            .find_by_id(id)
            .await
            .map_err(map_shelter_persistence_error)?
            .ok_or_else(|| shelter_not_found(id))
    }

    async fn store_revision(
        &self,
        current: Shelter,
        draft: ShelterDraft,
    ) -> Result<Shelter, Error> {
        let revised = current.revise(draft, self.clock.utc());
        let stored = self
            .shelters
            .update(&revised)
            .await
            .map_err(map_shelter_persistence_error)?;
        if !stored {
            return Err(shelter_not_found(revised.id()));
        }
        Ok(revised)
    }
}

#[async_trait]
impl<R> ShelterCommand for ShelterService<R>
where
    R: ShelterRepository,
{
    async fn create(&self, fields: ShelterFields) -> Result<Shelter, Error> {
        let draft = ShelterDraft::try_from(fields).map_err(invalid_shelter)?;
        let shelter = Shelter::create(draft, self.clock.utc());
        self.shelters
            .insert(&shelter)
            .await
            .map_err(map_shelter_persistence_error)?;
        info!(shelter_id = %shelter.id(), "created shelter");
        Ok(shelter)
    }

    async fn replace(&self, id: &ShelterId, fields: ShelterFields) -> Result<Shelter, Error> {
        let draft = ShelterDraft::try_from(fields).map_err(invalid_shelter)?;
        let current = self.load(id).await?;
        self.store_revision(current, draft).await
    }

    async fn patch(&self, id: &ShelterId, patch: ShelterPatch) -> Result<Shelter, Error> {
        let current = self.load(id).await?;
        let draft = patch.apply(current.draft()).map_err(invalid_shelter)?;
        self.store_revision(current, draft).await
    }

    async fn delete(&self, id: &ShelterId) -> Result<(), Error> {
        let removed = self
            .shelters
            .delete(id)
            .await
            .map_err(map_shelter_persistence_error)?;
        if !removed {
            return Err(shelter_not_found(id));
        }
        info!(shelter_id = %id, "deleted shelter");
        Ok(())
    }
}

#[async_trait]
impl<R> ShelterQuery for ShelterService<R>
where
    R: ShelterRepository,
{
    async fn list(&self) -> Result<Vec<Shelter>, Error> {
        self.shelters
            .list_all()
            .await
            .map_err(map_shelter_persistence_error)
    }

    async fn get(&self, id: &ShelterId) -> Result<Shelter, Error> {
        self.load(id).await
    }

    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyShelter>, Error> {
        let shelters = self.list().await?;
        Ok(rank_nearby(shelters, query))
    }
}

#[cfg(test)]
#[path = "shelter_service_tests.rs"]
mod tests;
