//! Reading and updating the caller's own account.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserProfileCommand, UserProfileQuery, UserRepository};
use crate::domain::repository_errors::map_user_persistence_error;
use crate::domain::{Error, Identity, User, UserProfile};

#[derive(Clone)]
pub struct UserProfileService<R> {
    users: Arc<R>,
}

impl<R> UserProfileService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> UserProfileService<R>
where
    R: UserRepository,
{
    async fn load(&self, identity: &Identity) -> Result<User, Error> {
        self.users
            .find_by_id(identity.user_id())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[async_trait]
impl<R> UserProfileQuery for UserProfileService<R>
where
    R: UserRepository,
{
    async fn current_user(&self, identity: &Identity) -> Result<User, Error> {
        self.load(identity).await
    }
}

#[async_trait]
impl<R> UserProfileCommand for UserProfileService<R>
where
    R: UserRepository,
{
    async fn update_profile(
        &self,
        identity: &Identity,
        profile: UserProfile,
    ) -> Result<User, Error> {
        let updated = self.load(identity).await?.with_profile(profile);
        let stored = self
            .users
            .update(&updated)
            .await
            .map_err(map_user_persistence_error)?;
        if !stored {
            return Err(Error::not_found("user not found"));
        }
        info!(user_id = %updated.id(), "updated user profile");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{ErrorCode, ResidenceType, Transport};
    use crate::test_support::sample_user;
    use rstest::rstest;

    fn new_profile() -> UserProfile {
        UserProfile {
            age: 71,
            residence_type: ResidenceType::House,
            transport: Transport::Car,
            has_pet: true,
            mobility_impaired: true,
            health_status: "uses a wheelchair".into(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_profile_and_keeps_credentials() {
        let user = sample_user("frank");
        let identity = Identity::from(&user);
        let original_hash = user.password_hash().clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(user)));
        users
            .expect_update()
            .withf(move |u| u.profile() == &new_profile() && u.password_hash() == &original_hash)
            .times(1)
            .returning(|_| Ok(true));

        let updated = UserProfileService::new(Arc::new(users))
            .update_profile(&identity, new_profile())
            .await
            .expect("update succeeds");

        assert_eq!(updated.profile(), &new_profile());
        assert_eq!(updated.username().as_ref(), "frank");
    }

    #[rstest]
    #[tokio::test]
    async fn vanished_row_is_not_found() {
        let user = sample_user("gina");
        let identity = Identity::from(&user);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(user)));
        users.expect_update().returning(|_| Ok(false));

        let err = UserProfileService::new(Arc::new(users))
            .update_profile(&identity, new_profile())
            .await
            .expect_err("row vanished");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn current_user_missing_is_not_found() {
        let identity = Identity::from(&sample_user("hank"));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let err = UserProfileService::new(Arc::new(users))
            .current_user(&identity)
            .await
            .expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
