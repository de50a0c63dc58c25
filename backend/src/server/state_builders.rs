//! Builders for the HTTP state from configured adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use shelter_backend::inbound::http::state::HttpState;
use shelter_backend::outbound::memory::{InMemoryShelterRepository, InMemoryUserRepository};
use shelter_backend::outbound::persistence::{DieselShelterRepository, DieselUserRepository};
use shelter_backend::outbound::security::{Argon2CredentialHasher, HmacSessionTokens};

use super::ServerConfig;

/// Wire domain services over Diesel repositories when a pool is configured,
/// otherwise over fresh in-memory stores.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = Arc::new(HmacSessionTokens::new(
        config.token_key.clone(),
        config.token_ttl,
        Arc::clone(&clock),
    ));
    let hasher = Arc::new(Argon2CredentialHasher::default());

    match &config.db_pool {
        Some(pool) => HttpState::from_adapters(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselShelterRepository::new(pool.clone())),
            hasher,
            tokens,
            clock,
        ),
        None => HttpState::from_adapters(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryShelterRepository::new()),
            hasher,
            tokens,
            clock,
        ),
    }
}
