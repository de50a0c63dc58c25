//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

use super::lock;

#[derive(Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    ids_by_username: HashMap<Username, UserId>,
}

/// User store keyed by id with a unique username index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<Users>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        lock(&self.state).by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = lock(&self.state);
        if state.ids_by_username.contains_key(user.username()) {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        if state.by_id.contains_key(user.id()) {
            return Err(UserPersistenceError::query(format!(
                "user {} already exists",
                user.id()
            )));
        }
        state
            .ids_by_username
            .insert(user.username().clone(), *user.id());
        state.by_id.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.state).by_id.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = lock(&self.state);
        Ok(state
            .ids_by_username
            .get(username)
            .and_then(|id| state.by_id.get(id))
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut state = lock(&self.state);
        match state.by_id.get_mut(user.id()) {
            Some(existing) if existing.username() == user.username() => {
                *existing = user.clone();
                Ok(true)
            }
            Some(_) => Err(UserPersistenceError::query("username is immutable")),
            None => Ok(false),
        }
    }
}
