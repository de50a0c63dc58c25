//! Personalised advice for the authenticated caller.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::advice::advise_for_profile;
use crate::domain::ports::{AdviceQuery, UserRepository};
use crate::domain::repository_errors::map_user_persistence_error;
use crate::domain::{Advice, Error, Identity};

/// Resolves the caller's stored profile and runs the advice rules on it.
#[derive(Clone)]
pub struct AdviceService<R> {
    users: Arc<R>,
}

impl<R> AdviceService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> AdviceQuery for AdviceService<R>
where
    R: UserRepository,
{
    async fn advice_for(&self, identity: &Identity) -> Result<Advice, Error> {
        let user = self
            .users
            .find_by_username(identity.username())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        Ok(advise_for_profile(user.profile()))
    }
}
