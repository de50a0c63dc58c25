//! PostgreSQL-backed `ShelterRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ShelterPersistenceError, ShelterRepository};
use crate::domain::{Shelter, ShelterId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::ShelterRow;
use super::pool::{DbPool, PoolError};
use super::schema::shelter;

/// Diesel-backed implementation of the [`ShelterRepository`] port.
#[derive(Clone)]
pub struct DieselShelterRepository {
    pool: DbPool,
}

impl DieselShelterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ShelterPersistenceError {
    ShelterPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> ShelterPersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => ShelterPersistenceError::connection(message),
        DieselFailure::Query(message) => ShelterPersistenceError::query(message),
        DieselFailure::UniqueViolation => {
            ShelterPersistenceError::query("unique constraint violated")
        }
    }
}

fn to_row(shelter: &Shelter) -> Result<ShelterRow, ShelterPersistenceError> {
    ShelterRow::try_from(shelter).map_err(|err| ShelterPersistenceError::query(err.to_string()))
}

fn from_row(row: ShelterRow) -> Result<Shelter, ShelterPersistenceError> {
    Shelter::try_from(row).map_err(|err| ShelterPersistenceError::query(err.to_string()))
}

#[async_trait]
impl ShelterRepository for DieselShelterRepository {
    async fn insert(&self, record: &Shelter) -> Result<(), ShelterPersistenceError> {
        let row = to_row(record)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(shelter::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &ShelterId) -> Result<Option<Shelter>, ShelterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ShelterRow> = shelter::table
            .filter(shelter::id.eq(id.as_uuid()))
            .select(ShelterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Shelter>, ShelterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ShelterRow> = shelter::table
            .order((shelter::name.asc(), shelter::id.asc()))
            .select(ShelterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(from_row).collect()
    }

    async fn update(&self, record: &Shelter) -> Result<bool, ShelterPersistenceError> {
        let row = to_row(record)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(shelter::table.filter(shelter::id.eq(row.id)))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn delete(&self, id: &ShelterId) -> Result<bool, ShelterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(shelter::table.filter(shelter::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
