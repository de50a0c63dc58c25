//! Driven port for issuing and validating bearer tokens.

use crate::domain::{Identity, IssuedToken};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    pub enum SessionTokenError {
        /// The token is malformed, tampered with, or signed by another key.
        Invalid { reason: String } => "token rejected: {reason}",
        /// The token was well formed but has expired.
        Expired => "token expired",
        /// The adapter could not mint a token.
        Issue { message: String } => "token issuance failed: {message}",
    }
}

/// Issues opaque bearer tokens bound to an [`Identity`] and validates them.
///
/// `validate` must be a pure function of the token, the signing key and the
/// current time.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokens: Send + Sync {
    fn issue(&self, identity: &Identity) -> Result<IssuedToken, SessionTokenError>;

    fn validate(&self, token: &str) -> Result<Identity, SessionTokenError>;
}
