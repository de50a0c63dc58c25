//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AdviceQuery, CredentialHasher, LoginService, SessionTokens, ShelterCommand, ShelterQuery,
    ShelterRepository, UserProfileCommand, UserProfileQuery, UserRegistration, UserRepository,
};
use crate::domain::{
    AdviceService, CredentialService, RegistrationService, ShelterService, UserProfileService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub advice: Arc<dyn AdviceQuery>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_command: Arc<dyn UserProfileCommand>,
    pub shelters: Arc<dyn ShelterCommand>,
    pub shelters_query: Arc<dyn ShelterQuery>,
}

impl HttpState {
    /// Wire the domain services on top of the given driven adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use mockable::DefaultClock;
    /// use shelter_backend::inbound::http::state::HttpState;
    /// use shelter_backend::outbound::memory::{InMemoryShelterRepository, InMemoryUserRepository};
    /// use shelter_backend::outbound::security::{Argon2CredentialHasher, HmacSessionTokens};
    /// use zeroize::Zeroizing;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let tokens = HmacSessionTokens::new(
    ///     Zeroizing::new(vec![7; 64]),
    ///     Duration::from_secs(3600),
    ///     clock.clone(),
    /// );
    /// let state = HttpState::from_adapters(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(InMemoryShelterRepository::new()),
    ///     Arc::new(Argon2CredentialHasher::default()),
    ///     Arc::new(tokens),
    ///     clock,
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn from_adapters<U, S, H, T>(
        users: Arc<U>,
        shelters: Arc<S>,
        hasher: Arc<H>,
        tokens: Arc<T>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        S: ShelterRepository + 'static,
        H: CredentialHasher + 'static,
        T: SessionTokens + 'static,
    {
        let profile = Arc::new(UserProfileService::new(Arc::clone(&users)));
        let shelter_service = Arc::new(ShelterService::new(shelters, clock));
        Self {
            login: Arc::new(CredentialService::new(
                Arc::clone(&users),
                Arc::clone(&hasher),
                tokens,
            )),
            registration: Arc::new(RegistrationService::new(Arc::clone(&users), hasher)),
            advice: Arc::new(AdviceService::new(users)),
            profile: profile.clone(),
            profile_command: profile,
            shelters: shelter_service.clone(),
            shelters_query: shelter_service,
        }
    }
}
