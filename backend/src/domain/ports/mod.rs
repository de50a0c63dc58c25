//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `UserRegistration`, `AdviceQuery`, the
//! profile and shelter ports) are called by inbound adapters. Driven ports
//! (`UserRepository`, `ShelterRepository`, `CredentialHasher`,
//! `SessionTokens`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod advice_query;
mod credential_hasher;
mod login_service;
mod session_tokens;
mod shelter_command;
mod shelter_query;
mod shelter_repository;
mod user_profile_command;
mod user_profile_query;
mod user_registration;
mod user_repository;

pub use advice_query::AdviceQuery;
#[cfg(test)]
pub use advice_query::MockAdviceQuery;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use session_tokens::MockSessionTokens;
pub use session_tokens::{SessionTokenError, SessionTokens};
#[cfg(test)]
pub use shelter_command::MockShelterCommand;
pub use shelter_command::ShelterCommand;
#[cfg(test)]
pub use shelter_query::MockShelterQuery;
pub use shelter_query::ShelterQuery;
#[cfg(test)]
pub use shelter_repository::MockShelterRepository;
pub use shelter_repository::{ShelterPersistenceError, ShelterRepository};
#[cfg(test)]
pub use user_profile_command::MockUserProfileCommand;
pub use user_profile_command::UserProfileCommand;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
