//! Driving port for updating the caller's own profile.

use async_trait::async_trait;

use crate::domain::{Error, Identity, User, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Replace every profile field. Username, password and roles are kept.
    async fn update_profile(&self, identity: &Identity, profile: UserProfile)
    -> Result<User, Error>;
}
