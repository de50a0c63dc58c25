//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationRequest, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Register a new account. A taken username fails with
    /// [`crate::domain::ErrorCode::Conflict`].
    async fn register(&self, request: RegistrationRequest) -> Result<User, Error>;
}
