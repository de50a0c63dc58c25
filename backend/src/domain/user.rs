//! User data model.
//!
//! A [`User`] couples the immutable account identity (id, username, password
//! hash, roles) with a mutable [`UserProfile`] describing the circumstances
//! that drive evacuation advice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum username length, matching the `users.username` column.
pub const USERNAME_MAX: usize = 255;

/// Role string assigned to every newly registered account.
pub const DEFAULT_ROLES: &str = "ROLE_USER";

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    EmptyUsername,
    UsernameTooLong { max: usize },
    EmptyPasswordHash,
    UnknownResidenceType(String),
    UnknownTransport(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyPasswordHash => write!(f, "password hash must not be empty"),
            Self::UnknownResidenceType(raw) => write!(f, "unknown residence type: {raw}"),
            Self::UnknownTransport(raw) => write!(f, "unknown transport: {raw}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its canonical string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Unique login name.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace.
/// - Non-empty and at most [`USERNAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`], trimming surrounding whitespace.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Argon2id password hash in PHC string format.
///
/// The plaintext password is never stored; `Debug` output is redacted so the
/// hash cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded PHC hash string.
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }

    /// Encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

macro_rules! symbolic_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $error:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Symbolic name used for persistence and serialisation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UserValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UserValidationError::$error(other.to_owned())),
                }
            }
        }
    };
}

symbolic_enum! {
    /// Kind of building the user lives in.
    ResidenceType, UnknownResidenceType {
        Underground => "UNDERGROUND",
        HighRiseApartment => "HIGH_RISE_APARTMENT",
        LowRiseApartment => "LOW_RISE_APARTMENT",
        House => "HOUSE",
        Office => "OFFICE",
        Etc => "ETC",
    }
}

symbolic_enum! {
    /// Primary means of transport available to the user.
    Transport, UnknownTransport {
        Car => "CAR",
        PublicTransport => "PUBLIC_TRANSPORT",
        Walk => "WALK",
        Bicycle => "BICYCLE",
        Etc => "ETC",
    }
}

/// Mutable profile fields of a user.
///
/// Only `residence_type` and `mobility_impaired` currently influence advice;
/// the remaining fields are stored for future rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub age: u16,
    pub residence_type: ResidenceType,
    pub transport: Transport,
    pub has_pet: bool,
    pub mobility_impaired: bool,
    pub health_status: String,
}

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
    profile: UserProfile,
    roles: String,
}

impl User {
    /// Assemble a user from validated parts.
    pub fn new(
        id: UserId,
        username: Username,
        password_hash: PasswordHash,
        profile: UserProfile,
        roles: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            profile,
            roles: roles.into(),
        }
    }

    /// Build a freshly registered user with a random id and default roles.
    pub fn register(username: Username, password_hash: PasswordHash, profile: UserProfile) -> Self {
        Self::new(UserId::random(), username, password_hash, profile, DEFAULT_ROLES)
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn roles(&self) -> &str {
        self.roles.as_str()
    }

    /// Replace the profile, leaving identity, credentials and roles intact.
    #[must_use]
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }
}
