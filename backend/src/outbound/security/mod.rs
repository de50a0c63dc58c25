//! Credential hashing and bearer token adapters.

mod argon2_hasher;
mod hmac_tokens;

pub use argon2_hasher::Argon2CredentialHasher;
pub use hmac_tokens::HmacSessionTokens;
