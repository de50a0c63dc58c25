//! Bearer token authentication for HTTP handlers.
//!
//! Handlers that require a caller take an [`Authenticated`] argument. The
//! extractor reads `Authorization: Bearer <token>`, resolves it through the
//! [`LoginService`](crate::domain::ports::LoginService) port held in
//! [`HttpState`], and hands the resulting [`Identity`] to the handler. No
//! identity is ever stored outside the request.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Identity};
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Identity of the caller, established from a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated(pub Identity);

impl Authenticated {
    pub fn identity(&self) -> &Identity {
        &self.0
    }

    pub fn into_inner(self) -> Identity {
        self.0
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// The scheme is matched case-insensitively.
pub(crate) fn bearer_token(header: &str) -> Result<&str, Error> {
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(Error::unauthorized(
            "authorization header must use the Bearer scheme",
        ));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::unauthorized("bearer token must not be empty"));
    }
    Ok(token)
}

fn token_from_request(req: &HttpRequest) -> Result<String, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("authentication required"))?
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header must be ASCII"))?;
    bearer_token(header).map(str::to_owned)
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = token_from_request(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            state.login.identify(&token).await.map(Authenticated)
        })
    }
}
