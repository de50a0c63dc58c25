//! Shelter data model.
//!
//! Client-supplied fields are validated into a [`ShelterDraft`]; the stored
//! [`Shelter`] adds the server-managed identifier and timestamps.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::geo::{Coordinates, GeoValidationError};

/// Maximum shelter name length.
pub const NAME_MAX: usize = 100;
/// Maximum address length.
pub const ADDRESS_MAX: usize = 255;
/// Maximum shelter type length.
pub const TYPE_MAX: usize = 50;
/// Maximum contact length.
pub const CONTACT_MAX: usize = 20;
/// Largest storable capacity; the column is a signed 32-bit integer.
pub const CAPACITY_MAX: u32 = i32::MAX as u32;

/// Validation failures for shelter payloads.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShelterValidationError {
    #[error("{field} must not be empty")]
    Blank { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("capacity must be at most {max}")]
    CapacityTooLarge { max: u32 },
    #[error(transparent)]
    Location(#[from] GeoValidationError),
}

impl ShelterValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field } | Self::TooLong { field, .. } => field,
            Self::CapacityTooLarge { .. } => "capacity",
            Self::Location(err) => err.field(),
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Blank { .. } => "blank",
            Self::TooLong { .. } => "too_long",
            Self::CapacityTooLarge { .. } => "too_large",
            Self::Location(_) => "out_of_range",
        }
    }
}

/// Stable shelter identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShelterId(Uuid);

impl ShelterId {
    /// Generate a new random [`ShelterId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ShelterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ShelterId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Raw client-supplied shelter fields prior to validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelterFields {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: u32,
    pub shelter_type: Option<String>,
    pub contact: Option<String>,
}

/// Validated client-controlled shelter fields.
///
/// ## Invariants
/// - `name` and `address` are trimmed, non-blank and within length limits.
/// - `shelter_type` and `contact` are trimmed; blank values become `None`.
/// - `location` holds in-range, finite coordinates.
/// - `capacity` is at most [`CAPACITY_MAX`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShelterDraft {
    name: String,
    address: String,
    location: Coordinates,
    capacity: u32,
    shelter_type: Option<String>,
    contact: Option<String>,
}

fn required(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ShelterValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShelterValidationError::Blank { field });
    }
    within(trimmed, field, max)
}

fn optional(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ShelterValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => within(trimmed, field, max).map(Some),
    }
}

fn within(value: &str, field: &'static str, max: usize) -> Result<String, ShelterValidationError> {
    if value.chars().count() > max {
        return Err(ShelterValidationError::TooLong { field, max });
    }
    Ok(value.to_owned())
}

fn bounded_capacity(capacity: u32) -> Result<u32, ShelterValidationError> {
    if capacity > CAPACITY_MAX {
        return Err(ShelterValidationError::CapacityTooLarge { max: CAPACITY_MAX });
    }
    Ok(capacity)
}

impl TryFrom<ShelterFields> for ShelterDraft {
    type Error = ShelterValidationError;

    fn try_from(fields: ShelterFields) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(&fields.name, "name", NAME_MAX)?,
            address: required(&fields.address, "address", ADDRESS_MAX)?,
            location: Coordinates::new(fields.latitude, fields.longitude)?,
            capacity: bounded_capacity(fields.capacity)?,
            shelter_type: optional(fields.shelter_type.as_deref(), "type", TYPE_MAX)?,
            contact: optional(fields.contact.as_deref(), "contact", CONTACT_MAX)?,
        })
    }
}

impl From<ShelterDraft> for ShelterFields {
    fn from(draft: ShelterDraft) -> Self {
        Self {
            name: draft.name,
            address: draft.address,
            latitude: draft.location.latitude(),
            longitude: draft.location.longitude(),
            capacity: draft.capacity,
            shelter_type: draft.shelter_type,
            contact: draft.contact,
        }
    }
}

impl ShelterDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn location(&self) -> &Coordinates {
        &self.location
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn shelter_type(&self) -> Option<&str> {
        self.shelter_type.as_deref()
    }

    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }
}

/// Partial update of shelter fields.
///
/// `None` leaves a field untouched. For the optional text fields an empty
/// string clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShelterPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: Option<u32>,
    pub shelter_type: Option<String>,
    pub contact: Option<String>,
}

impl ShelterPatch {
    /// Overlay the patch onto `current` and revalidate the result.
    pub fn apply(self, current: &ShelterDraft) -> Result<ShelterDraft, ShelterValidationError> {
        let mut fields = ShelterFields::from(current.clone());
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(address) = self.address {
            fields.address = address;
        }
        if let Some(latitude) = self.latitude {
            fields.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            fields.longitude = longitude;
        }
        if let Some(capacity) = self.capacity {
            fields.capacity = capacity;
        }
        if let Some(shelter_type) = self.shelter_type {
            fields.shelter_type = Some(shelter_type);
        }
        if let Some(contact) = self.contact {
            fields.contact = Some(contact);
        }
        ShelterDraft::try_from(fields)
    }
}

/// Stored shelter record.
///
/// ## Invariants
/// - `created_at` never changes once the record exists.
/// - `updated_at` never moves backwards across revisions.
#[derive(Debug, Clone, PartialEq)]
pub struct Shelter {
    id: ShelterId,
    draft: ShelterDraft,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Shelter {
    pub fn new(
        id: ShelterId,
        draft: ShelterDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            draft,
            created_at,
            updated_at,
        }
    }

    /// Create a brand-new record stamped at `now`.
    pub fn create(draft: ShelterDraft, now: DateTime<Utc>) -> Self {
        Self::new(ShelterId::random(), draft, now, now)
    }

    /// Replace client fields, keeping `created_at` and advancing
    /// `updated_at` to `max(now, previous)`.
    #[must_use]
    pub fn revise(self, draft: ShelterDraft, now: DateTime<Utc>) -> Self {
        let updated_at = now.max(self.updated_at);
        Self {
            draft,
            updated_at,
            ..self
        }
    }

    pub fn id(&self) -> &ShelterId {
        &self.id
    }

    pub fn draft(&self) -> &ShelterDraft {
        &self.draft
    }

    pub fn name(&self) -> &str {
        self.draft.name()
    }

    pub fn address(&self) -> &str {
        self.draft.address()
    }

    pub fn location(&self) -> &Coordinates {
        self.draft.location()
    }

    pub fn capacity(&self) -> u32 {
        self.draft.capacity()
    }

    pub fn shelter_type(&self) -> Option<&str> {
        self.draft.shelter_type()
    }

    pub fn contact(&self) -> Option<&str> {
        self.draft.contact()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests;
