//! Internal Diesel row structs and their conversions to domain types.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    PasswordHash, ResidenceType, Shelter, ShelterDraft, ShelterFields, ShelterId, Transport, User,
    UserId, UserProfile, Username,
};

use super::schema::{shelter, users};

/// Failure converting between rows and domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub(crate) struct RowConversionError(String);

impl RowConversionError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Row struct for reading from and writing to the `shelter` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = shelter)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ShelterRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: i32,
    pub shelter_type: Option<String>,
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&Shelter> for ShelterRow {
    type Error = RowConversionError;

    fn try_from(value: &Shelter) -> Result<Self, Self::Error> {
        let capacity = i32::try_from(value.capacity())
            .map_err(|_| RowConversionError::new("capacity exceeds the storable range"))?;
        Ok(Self {
            id: *value.id().as_uuid(),
            name: value.name().to_owned(),
            address: value.address().to_owned(),
            latitude: value.location().latitude(),
            longitude: value.location().longitude(),
            capacity,
            shelter_type: value.shelter_type().map(str::to_owned),
            contact: value.contact().map(str::to_owned),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        })
    }
}

impl TryFrom<ShelterRow> for Shelter {
    type Error = RowConversionError;

    fn try_from(row: ShelterRow) -> Result<Self, Self::Error> {
        let capacity = u32::try_from(row.capacity).map_err(|_| {
            RowConversionError::new(format!("shelter {} has negative capacity", row.id))
        })?;
        let draft = ShelterDraft::try_from(ShelterFields {
            name: row.name,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            capacity,
            shelter_type: row.shelter_type,
            contact: row.contact,
        })
        .map_err(|err| RowConversionError::new(format!("shelter {}: {err}", row.id)))?;
        Ok(Shelter::new(
            ShelterId::from_uuid(row.id),
            draft,
            row.created_at,
            row.updated_at,
        ))
    }
}

/// Row struct for reading from and writing to the `users` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub age: i32,
    pub residence_type: String,
    pub transport: String,
    pub has_pet: bool,
    pub mobility_impaired: bool,
    pub health_status: String,
    pub roles: String,
}

/// Changeset for a full user update. Username is immutable and excluded.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub password: &'a str,
    pub age: i32,
    pub residence_type: &'a str,
    pub transport: &'a str,
    pub has_pet: bool,
    pub mobility_impaired: bool,
    pub health_status: &'a str,
    pub roles: &'a str,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: *user.id().as_uuid(),
            username: user.username().to_string(),
            password: user.password_hash().as_str().to_owned(),
            age: i32::from(profile.age),
            residence_type: profile.residence_type.as_str().to_owned(),
            transport: profile.transport.as_str().to_owned(),
            has_pet: profile.has_pet,
            mobility_impaired: profile.mobility_impaired,
            health_status: profile.health_status.clone(),
            roles: user.roles().to_owned(),
        }
    }
}

impl<'a> From<&'a User> for UserUpdate<'a> {
    fn from(user: &'a User) -> Self {
        let profile = user.profile();
        Self {
            password: user.password_hash().as_str(),
            age: i32::from(profile.age),
            residence_type: profile.residence_type.as_str(),
            transport: profile.transport.as_str(),
            has_pet: profile.has_pet,
            mobility_impaired: profile.mobility_impaired,
            health_status: profile.health_status.as_str(),
            roles: user.roles(),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |err: &dyn std::fmt::Display| {
            RowConversionError::new(format!("user {id}: {err}"))
        };
        let username = Username::new(&row.username).map_err(|err| invalid(&err))?;
        let password_hash = PasswordHash::new(row.password).map_err(|err| invalid(&err))?;
        let age = u16::try_from(row.age).map_err(|err| invalid(&err))?;
        let residence_type: ResidenceType =
            row.residence_type.parse().map_err(|err| invalid(&err))?;
        let transport: Transport = row.transport.parse().map_err(|err| invalid(&err))?;

        Ok(User::new(
            UserId::from_uuid(id),
            username,
            password_hash,
            UserProfile {
                age,
                residence_type,
                transport,
                has_pet: row.has_pet,
                mobility_impaired: row.mobility_impaired,
                health_status: row.health_status,
            },
            row.roles,
        ))
    }
}
