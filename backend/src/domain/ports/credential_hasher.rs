//! Driven port for one-way password hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised while hashing or verifying a password.
    pub enum CredentialHashError {
        /// The hashing primitive failed to produce a hash.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hashes plaintext passwords and checks them against stored hashes.
///
/// Hashing is CPU-bound, so the port is synchronous; callers decide whether
/// to move work off the async executor.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHashError>;

    /// Return whether `password` matches `hash`.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHashError>;
}
