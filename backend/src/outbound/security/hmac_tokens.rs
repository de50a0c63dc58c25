//! HMAC-SHA256 signed bearer tokens.
//!
//! Token layout: `base64url(claims_json) "." base64url(hmac_sha256(key, first_segment))`,
//! both segments unpadded. Claims carry the subject id, username, roles and
//! `iat`/`exp` in Unix seconds. Validation depends only on the token, the key
//! and the injected clock.

use std::sync::Arc;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::DateTime;
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::ports::{SessionTokenError, SessionTokens};
use crate::domain::{Identity, IssuedToken, SessionToken, UserId, Username};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Claims {
    sub: String,
    username: String,
    roles: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates signed bearer tokens.
pub struct HmacSessionTokens {
    key: Zeroizing<Vec<u8>>,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl HmacSessionTokens {
    pub fn new(key: Zeroizing<Vec<u8>>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            key,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
            clock,
        }
    }

    fn mac(&self) -> Result<HmacSha256, SessionTokenError> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|err| SessionTokenError::issue(format!("invalid signing key: {err}")))
    }
}

impl SessionTokens for HmacSessionTokens {
    fn issue(&self, identity: &Identity) -> Result<IssuedToken, SessionTokenError> {
        let iat = self.clock.utc().timestamp();
        let exp = iat.saturating_add(self.ttl_secs);
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| SessionTokenError::issue("expiry is outside the representable range"))?;
        let claims = Claims {
            sub: identity.user_id().to_string(),
            username: identity.username().to_string(),
            roles: identity.roles().to_owned(),
            iat,
            exp,
        };
        let json = serde_json::to_vec(&claims)
            .map_err(|err| SessionTokenError::issue(err.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(IssuedToken {
            token: SessionToken::new(format!("{payload}.{signature}")),
            expires_at,
        })
    }

    fn validate(&self, token: &str) -> Result<Identity, SessionTokenError> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(|| SessionTokenError::invalid("token must have two segments"))?;
        if payload.is_empty() || signature.is_empty() || signature.contains('.') {
            return Err(SessionTokenError::invalid("token must have two segments"));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| SessionTokenError::invalid("signature is not base64url"))?;
        let mut mac = self
            .mac()
            .map_err(|_| SessionTokenError::invalid("signing key unavailable"))?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionTokenError::invalid("signature mismatch"))?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| SessionTokenError::invalid("claims are not base64url"))?;
        let claims: Claims = serde_json::from_slice(&json)
            .map_err(|_| SessionTokenError::invalid("claims are not valid JSON"))?;
        if claims.exp <= claims.iat {
            return Err(SessionTokenError::invalid("expiry precedes issue time"));
        }
        if self.clock.utc().timestamp() >= claims.exp {
            return Err(SessionTokenError::Expired);
        }

        let user_id = UserId::new(&claims.sub)
            .map_err(|_| SessionTokenError::invalid("subject is not a user id"))?;
        let username = Username::new(&claims.username)
            .map_err(|_| SessionTokenError::invalid("username claim is invalid"))?;
        Ok(Identity::new(user_id, username, claims.roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MutableClock, fixed_now, sample_user};
    use rstest::{fixture, rstest};

    const TTL: Duration = Duration::from_secs(2 * 60 * 60);

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        Arc::new(MutableClock::new(fixed_now()))
    }

    fn tokens_with(key: &[u8], clock: Arc<MutableClock>) -> HmacSessionTokens {
        HmacSessionTokens::new(Zeroizing::new(key.to_vec()), TTL, clock)
    }

    fn identity() -> Identity {
        Identity::from(&sample_user("nora"))
    }

    #[rstest]
    fn issued_token_validates_to_same_identity(clock: Arc<MutableClock>) {
        let tokens = tokens_with(&[7; 64], clock);
        let issued = tokens.issue(&identity()).expect("issue");

        assert_eq!(issued.expires_at, fixed_now() + chrono::Duration::hours(2));
        let resolved = tokens.validate(issued.token.expose()).expect("valid token");
        assert_eq!(resolved, identity());
    }

    #[rstest]
    fn token_expires_at_exp(clock: Arc<MutableClock>) {
        let tokens = tokens_with(&[7; 64], Arc::clone(&clock));
        let issued = tokens.issue(&identity()).expect("issue");

        clock.advance_seconds(TTL.as_secs() as i64 - 1);
        assert!(tokens.validate(issued.token.expose()).is_ok());

        clock.advance_seconds(1);
        assert_eq!(
            tokens.validate(issued.token.expose()),
            Err(SessionTokenError::Expired)
        );
    }

    #[rstest]
    fn tampered_claims_are_rejected(clock: Arc<MutableClock>) {
        let tokens = tokens_with(&[7; 64], clock);
        let issued = tokens.issue(&identity()).expect("issue");
        let (_, signature) = issued.token.expose().split_once('.').expect("two segments");
        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&serde_json::json!({
                "sub": identity().user_id().to_string(),
                "username": "admin",
                "roles": "ROLE_USER",
                "iat": 0,
                "exp": i64::MAX,
            }))
            .expect("serialise"),
        );

        let err = tokens
            .validate(&format!("{forged_claims}.{signature}"))
            .expect_err("tampered");

        assert_eq!(err, SessionTokenError::invalid("signature mismatch"));
    }

    #[rstest]
    fn tokens_from_another_key_are_rejected(clock: Arc<MutableClock>) {
        let issuer = tokens_with(&[1; 64], Arc::clone(&clock));
        let verifier = tokens_with(&[2; 64], clock);
        let issued = issuer.issue(&identity()).expect("issue");

        assert!(matches!(
            verifier.validate(issued.token.expose()),
            Err(SessionTokenError::Invalid { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("no-dot")]
    #[case("a.b.c")]
    #[case(".sig")]
    #[case("payload.!!!")]
    fn malformed_tokens_are_rejected(clock: Arc<MutableClock>, #[case] token: &str) {
        let tokens = tokens_with(&[7; 64], clock);
        assert!(matches!(
            tokens.validate(token),
            Err(SessionTokenError::Invalid { .. })
        ));
    }
}
