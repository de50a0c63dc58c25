//! Argon2id implementation of the `CredentialHasher` port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Hashes passwords with Argon2id and a random 16-byte salt, producing PHC
/// strings such as `$argon2id$v=19$m=19456,t=2,p=1$...`.
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Argon2CredentialHasher {
    /// Hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| CredentialHashError::hash(err.to_string()))?
            .to_string();
        PasswordHash::new(encoded).map_err(|err| CredentialHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHashError> {
        let parsed = password_hash::PasswordHash::new(hash.as_str())
            .map_err(|err| CredentialHashError::malformed_hash(err.to_string()))?;
        // Parameters are read from the PHC string, so hashes made with other
        // costs still verify.
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialHashError::malformed_hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2CredentialHasher {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid test params");
        Argon2CredentialHasher::with_params(params)
    }

    #[rstest]
    fn hash_is_argon2id_phc_and_verifies(hasher: Argon2CredentialHasher) {
        let hash = hasher.hash("correct horse").expect("hash");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(!hash.as_str().contains("correct horse"));
        assert!(hasher.verify("correct horse", &hash).expect("verify"));
        assert!(!hasher.verify("wrong horse", &hash).expect("verify"));
    }

    #[rstest]
    fn salts_differ_between_hashes(hasher: Argon2CredentialHasher) {
        let first = hasher.hash("same").expect("hash");
        let second = hasher.hash("same").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_hash_is_an_error(hasher: Argon2CredentialHasher) {
        let bogus = PasswordHash::new("plaintext-password").expect("non-empty");
        let err = hasher.verify("pw", &bogus).expect_err("malformed");
        assert!(matches!(err, CredentialHashError::MalformedHash { .. }));
    }
}
