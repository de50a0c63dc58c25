//! Account registration workflow.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::credential_service::hash_password;
use crate::domain::ports::{CredentialHasher, UserRegistration, UserRepository};
use crate::domain::repository_errors::{duplicate_username, map_user_persistence_error};
use crate::domain::{Error, RegistrationRequest, User};

/// Registration service implementing [`UserRegistration`].
///
/// The pre-insert username lookup gives a friendly early conflict; the
/// repository's atomic insert remains the authority when registrations race.
#[derive(Clone)]
pub struct RegistrationService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> RegistrationService<R, H> {
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<R, H> UserRegistration for RegistrationService<R, H>
where
    R: UserRepository,
    H: CredentialHasher + 'static,
{
    async fn register(&self, request: RegistrationRequest) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_username(request.username())
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_some() {
            return Err(duplicate_username(request.username().as_ref()));
        }

        let hash = hash_password(&self.hasher, request.password()).await?;
        let (username, profile) = request.into_parts();
        let user = User::register(username, hash, profile);

        self.users
            .insert(&user)
            .await
            .map_err(map_user_persistence_error)?;

        info!(user_id = %user.id(), "registered user");
        Ok(user)
    }
}
