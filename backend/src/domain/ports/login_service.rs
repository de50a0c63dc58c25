//! Driving port for login and bearer authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials and to resolve a
//! bearer token into an [`Identity`] without importing the hashing or token
//! infrastructure.

use async_trait::async_trait;

use crate::domain::{AuthenticatedSession, Error, Identity, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a bearer session.
    ///
    /// Unknown users and wrong passwords fail identically with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedSession, Error>;

    /// Resolve a bearer token into the identity it was issued for.
    async fn identify(&self, token: &str) -> Result<Identity, Error>;
}
