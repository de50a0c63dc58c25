//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure becomes an `invalid_request` error whose details
//! name the offending `field` and a stable `code`.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, GeoValidationError, LoginValidationError, ShelterId};

/// Validation error codes raised by the HTTP layer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_shelter_id(value: &str) -> Result<ShelterId, Error> {
    parse_uuid(value, FieldName::new("id")).map(ShelterId::from_uuid)
}

pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

/// Map a rejected nearby-search origin or radius onto the query parameter
/// the client sent (`lat`, `lng` or `maxDistance`).
pub(crate) fn nearby_validation_error(err: GeoValidationError) -> Error {
    let field = match err {
        GeoValidationError::LatitudeOutOfRange => "lat",
        GeoValidationError::LongitudeOutOfRange => "lng",
        GeoValidationError::InvalidMaxDistance => "maxDistance",
    };
    field_error(field, ErrorCode::OutOfRange.as_str(), err.to_string())
}
