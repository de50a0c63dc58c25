//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    MockAdviceQuery, MockLoginService, MockShelterCommand, MockShelterQuery,
    MockUserProfileCommand, MockUserProfileQuery, MockUserRegistration,
};
use crate::domain::{Error, Identity};
use crate::inbound::http::error::configure_extractors;
use crate::inbound::http::state::HttpState;
use crate::test_support::sample_user;

/// Token accepted by [`MockPorts::authenticating`].
pub const TEST_TOKEN: &str = "test-token";

/// Mock driving ports, replaced field by field in each test.
///
/// Mocks without expectations panic when called, so a default bundle asserts
/// that a handler only touches the ports it configured.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockUserRegistration,
    pub advice: MockAdviceQuery,
    pub profile: MockUserProfileQuery,
    pub profile_command: MockUserProfileCommand,
    pub shelters: MockShelterCommand,
    pub shelters_query: MockShelterQuery,
}

impl MockPorts {
    /// Ports whose login service accepts [`TEST_TOKEN`] for `username`.
    pub fn authenticating(username: &str) -> Self {
        let identity = Identity::from(&sample_user(username));
        let mut login = MockLoginService::new();
        login.expect_identify().returning(move |token| {
            if token == TEST_TOKEN {
                Ok(identity.clone())
            } else {
                Err(Error::unauthorized("invalid token"))
            }
        });
        Self {
            login,
            ..Self::default()
        }
    }

    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            advice: Arc::new(self.advice),
            profile: Arc::new(self.profile),
            profile_command: Arc::new(self.profile_command),
            shelters: Arc::new(self.shelters),
            shelters_query: Arc::new(self.shelters_query),
        }
    }
}

/// `Authorization` header value carrying [`TEST_TOKEN`].
pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {TEST_TOKEN}"))
}

/// App with the given state and the production extractor configuration.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure_extractors)
}
