//! In-memory `ShelterRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{ShelterPersistenceError, ShelterRepository};
use crate::domain::{Shelter, ShelterId};

use super::lock;

#[derive(Default)]
pub struct InMemoryShelterRepository {
    shelters: Mutex<HashMap<ShelterId, Shelter>>,
}

impl InMemoryShelterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShelterRepository for InMemoryShelterRepository {
    async fn insert(&self, shelter: &Shelter) -> Result<(), ShelterPersistenceError> {
        let mut shelters = lock(&self.shelters);
        if shelters.contains_key(shelter.id()) {
            return Err(ShelterPersistenceError::query(format!(
                "shelter {} already exists",
                shelter.id()
            )));
        }
        shelters.insert(*shelter.id(), shelter.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ShelterId) -> Result<Option<Shelter>, ShelterPersistenceError> {
        Ok(lock(&self.shelters).get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Shelter>, ShelterPersistenceError> {
        let mut all: Vec<Shelter> = lock(&self.shelters).values().cloned().collect();
        all.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });
        Ok(all)
    }

    async fn update(&self, shelter: &Shelter) -> Result<bool, ShelterPersistenceError> {
        let mut shelters = lock(&self.shelters);
        match shelters.get_mut(shelter.id()) {
            Some(existing) => {
                *existing = shelter.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ShelterId) -> Result<bool, ShelterPersistenceError> {
        Ok(lock(&self.shelters).remove(id).is_some())
    }
}
