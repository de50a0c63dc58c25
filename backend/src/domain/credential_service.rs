//! Credential verification and bearer session issuance.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialHasher, LoginService, SessionTokenError, SessionTokens, UserRepository,
};
use crate::domain::repository_errors::map_user_persistence_error;
use crate::domain::{AuthenticatedSession, Error, Identity, LoginCredentials, PasswordHash};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Login service backed by the user store, a password hasher and a token
/// issuer.
#[derive(Clone)]
pub struct CredentialService<R, H, T> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> CredentialService<R, H, T> {
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn hashing_task_failed(err: tokio::task::JoinError) -> Error {
    Error::internal(format!("password hashing task failed: {err}"))
}

/// Hash `password` on the blocking pool so Argon2 does not stall the worker.
pub(super) async fn hash_password<H>(
    hasher: &Arc<H>,
    password: &str,
) -> Result<PasswordHash, Error>
where
    H: CredentialHasher + 'static,
{
    let hasher = Arc::clone(hasher);
    let password = Zeroizing::new(password.to_owned());
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(hashing_task_failed)?
        .map_err(|err| Error::internal(err.to_string()))
}

/// Check `password` against `hash` on the blocking pool.
pub(super) async fn verify_password<H>(
    hasher: &Arc<H>,
    password: &str,
    hash: &PasswordHash,
) -> Result<bool, Error>
where
    H: CredentialHasher + 'static,
{
    let hasher = Arc::clone(hasher);
    let password = Zeroizing::new(password.to_owned());
    let hash = hash.clone();
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(hashing_task_failed)?
        .map_err(|err| Error::internal(err.to_string()))
}

fn map_token_error(error: SessionTokenError) -> Error {
    match error {
        SessionTokenError::Expired => Error::unauthorized("token expired"),
        SessionTokenError::Invalid { reason } => {
            debug!(%reason, "bearer token rejected");
            Error::unauthorized("invalid token")
        }
        SessionTokenError::Issue { message } => {
            Error::internal(format!("failed to issue token: {message}"))
        }
    }
}

#[async_trait]
impl<R, H, T> LoginService for CredentialService<R, H, T>
where
    R: UserRepository,
    H: CredentialHasher + 'static,
    T: SessionTokens,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedSession, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches =
            verify_password(&self.hasher, credentials.password(), user.password_hash()).await?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let issued = self
            .tokens
            .issue(&Identity::from(&user))
            .map_err(map_token_error)?;
        info!(user_id = %user.id(), "user authenticated");
        Ok(AuthenticatedSession {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    async fn identify(&self, token: &str) -> Result<Identity, Error> {
        self.tokens.validate(token).map_err(map_token_error)
    }
}
