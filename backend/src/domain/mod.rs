//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities (users, shelters, advice) and the
//! services that implement the driving ports. Nothing here knows about HTTP
//! or SQL; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserProfile, ResidenceType, Transport: account model.
//! - Shelter, ShelterDraft, ShelterPatch: shelter model.
//! - advise / Advice: evacuation rules.
//! - *Service types implementing the ports in [`ports`].

pub mod advice;
pub mod auth;
pub mod error;
pub mod geo;
pub mod ports;
pub mod shelter;
pub mod trace_id;
pub mod user;

mod advice_service;
mod credential_service;
mod registration_service;
mod repository_errors;
mod shelter_service;
mod user_profile_service;

pub use self::advice::{Advice, advise, advise_for_profile};
pub use self::advice_service::AdviceService;
pub use self::auth::{
    AuthenticatedSession, Identity, IssuedToken, LoginCredentials, LoginValidationError,
    RegistrationRequest, SessionToken,
};
pub use self::credential_service::CredentialService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::geo::{
    Coordinates, DEFAULT_MAX_DISTANCE_METERS, DEFAULT_NEARBY_LIMIT, GeoValidationError,
    MAX_NEARBY_LIMIT, NearbyQuery, NearbyShelter,
};
pub use self::registration_service::RegistrationService;
pub use self::shelter::{
    Shelter, ShelterDraft, ShelterFields, ShelterId, ShelterPatch, ShelterValidationError,
};
pub use self::shelter_service::ShelterService;
pub use self::trace_id::TraceId;
pub use self::user::{
    DEFAULT_ROLES, PasswordHash, ResidenceType, Transport, User, UserId, UserProfile,
    UserValidationError, Username,
};
pub use self::user_profile_service::UserProfileService;
