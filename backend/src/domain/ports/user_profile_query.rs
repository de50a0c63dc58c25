//! Driving port for reading the caller's own account.

use async_trait::async_trait;

use crate::domain::{Error, Identity, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the stored record of the authenticated user.
    async fn current_user(&self, identity: &Identity) -> Result<User, Error>;
}
