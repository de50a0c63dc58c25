//! Shared helpers for backend HTTP integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the app wiring and request plumbing they share lives here. Every app is
//! built over fresh in-memory stores with cheap Argon2 parameters.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use argon2::Params;
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use zeroize::Zeroizing;

use shelter_backend::Trace;
use shelter_backend::inbound::http::configure_api;
use shelter_backend::inbound::http::error::configure_extractors;
use shelter_backend::inbound::http::state::HttpState;
use shelter_backend::outbound::memory::{InMemoryShelterRepository, InMemoryUserRepository};
use shelter_backend::outbound::security::{Argon2CredentialHasher, HmacSessionTokens};

pub const PASSWORD: &str = "correct horse battery";

/// Fresh state over empty in-memory stores.
pub fn memory_state() -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("argon2 params");
    let tokens = HmacSessionTokens::new(
        Zeroizing::new(vec![42; 64]),
        Duration::from_secs(3600),
        Arc::clone(&clock),
    );
    HttpState::from_adapters(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryShelterRepository::new()),
        Arc::new(Argon2CredentialHasher::with_params(params)),
        Arc::new(tokens),
        clock,
    )
}

/// The production app shape: trace middleware, extractor error handlers and
/// the `/api/v1` scope.
pub fn app(
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
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Issue a request and decode the JSON body, or `Value::Null` when empty.
pub async fn send<S, R, B>(app: &S, request: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

pub fn registration(username: &str, residence_type: &str, mobility_impaired: bool) -> Value {
    json!({
        "username": username,
        "password": PASSWORD,
        "age": 41,
        "residenceType": residence_type,
        "transport": "WALK",
        "hasPet": false,
        "mobilityImpaired": mobility_impaired,
        "healthStatus": "",
    })
}

pub fn shelter(name: &str, latitude: f64, longitude: f64, capacity: u32) -> Value {
    json!({
        "name": name,
        "address": "Jung-gu, Seoul",
        "latitude": latitude,
        "longitude": longitude,
        "capacity": capacity,
        "type": "underground",
        "contact": "02-120",
    })
}

/// Register `username` and return a bearer header for them.
pub async fn register_and_login<S, B>(app: &S, username: &str) -> (&'static str, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, _) = send(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(registration(username, "HOUSE", false))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"username": username, "password": PASSWORD}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token string");
    ("Authorization", format!("Bearer {token}"))
}
