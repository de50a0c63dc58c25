//! Authentication primitives: login and registration inputs, the
//! authenticated [`Identity`], and issued bearer sessions.
//!
//! Inbound adapters build these values from raw strings so that services only
//! ever see validated input.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::user::{User, UserId, UserProfile, UserValidationError, Username};

/// Domain error returned when login or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username exceeded the storage limit.
    UsernameTooLong { max: usize },
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::EmptyPassword => "password",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooLong { .. } => "username_too_long",
            Self::EmptyPassword => "empty_password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

fn validate_parts(
    username: &str,
    password: &str,
) -> Result<(Username, Zeroizing<String>), LoginValidationError> {
    let username = Username::new(username).map_err(|err| match err {
        UserValidationError::UsernameTooLong { max } => {
            LoginValidationError::UsernameTooLong { max }
        }
        _ => LoginValidationError::EmptyUsername,
    })?;
    if password.is_empty() {
        return Err(LoginValidationError::EmptyPassword);
    }
    Ok((username, Zeroizing::new(password.to_owned())))
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use shelter_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "pw").expect("valid");
/// assert_eq!(creds.username().as_ref(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let (username, password) = validate_parts(username, password)?;
        Ok(Self { username, password })
    }

    /// Username suitable for user lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    credentials: LoginCredentials,
    profile: UserProfile,
}

impl RegistrationRequest {
    /// Validate raw username/password inputs and pair them with a profile.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        profile: UserProfile,
    ) -> Result<Self, LoginValidationError> {
        Ok(Self {
            credentials: LoginCredentials::try_from_parts(username, password)?,
            profile,
        })
    }

    pub fn username(&self) -> &Username {
        self.credentials.username()
    }

    pub fn password(&self) -> &str {
        self.credentials.password()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Discard the plaintext password and keep the profile.
    pub fn into_parts(self) -> (Username, UserProfile) {
        (self.credentials.username, self.profile)
    }
}

/// Authenticated caller established from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    username: Username,
    roles: String,
}

impl Identity {
    pub fn new(user_id: UserId, username: Username, roles: impl Into<String>) -> Self {
        Self {
            user_id,
            username,
            roles: roles.into(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn roles(&self) -> &str {
        self.roles.as_str()
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(*user.id(), user.username().clone(), user.roles())
    }
}

/// Opaque bearer token string.
///
/// `Debug` is redacted; use [`SessionToken::expose`] to obtain the value for
/// the response body.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Token issued by the token port together with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl AuthenticatedSession {
    /// Identity the token is bound to.
    pub fn identity(&self) -> Identity {
        Identity::from(&self.user)
    }
}
