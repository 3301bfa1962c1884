//! HS256 JSON Web Tokens implementing `SessionTokens`.
//!
//! Claims: `sub` (account id), `role`, `name`, `iat`, `exp` (Unix seconds).
//! Expiry is checked against the injected clock rather than the library's
//! system-time check so tests can move time.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{SessionTokenError, SessionTokens};
use crate::domain::{AccountId, AccountName, Identity, IssuedToken, Role};

/// Lifetime of an issued token unless configured otherwise.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: Role,
    name: String,
    iat: i64,
    exp: i64,
}

/// Stateless signer/verifier holding the process signing secret.
pub struct JwtSessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtSessionTokens {
    pub fn new(secret: &[u8], ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }
}

impl SessionTokens for JwtSessionTokens {
    fn issue(&self, identity: &Identity) -> Result<IssuedToken, SessionTokenError> {
        // Claims carry whole seconds; keep `expires_at` on the same boundary.
        let issued_at = self.clock.utc().trunc_subsecs(0);
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: *identity.account_id.as_uuid(),
            role: identity.role,
            name: identity.name.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| SessionTokenError::signing(err.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<Identity, SessionTokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                debug!(error = %err, "session token rejected");
                SessionTokenError::invalid()
            })?
            .claims;

        let expired = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .is_none_or(|expires_at| self.clock.utc() > expires_at);
        if expired {
            debug!(account_id = %claims.sub, "session token expired");
            return Err(SessionTokenError::invalid());
        }

        let name = AccountName::new(&claims.name).map_err(|_| SessionTokenError::invalid())?;
        Ok(Identity {
            account_id: AccountId::from_uuid(claims.sub),
            role: claims.role,
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedClock;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[fixture]
    fn clock() -> Arc<FixedClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 5, 1, 8, 0, 0)
            .single()
            .expect("fixture timestamp");
        Arc::new(FixedClock::new(start))
    }

    #[fixture]
    fn identity() -> Identity {
        Identity {
            account_id: AccountId::random(),
            role: Role::Admin,
            name: AccountName::new("Meera").expect("name"),
        }
    }

    fn tokens(secret: &[u8], clock: &Arc<FixedClock>) -> JwtSessionTokens {
        JwtSessionTokens::new(
            secret,
            TimeDelta::hours(DEFAULT_TOKEN_TTL_HOURS),
            Arc::clone(clock) as Arc<dyn Clock>,
        )
    }

    #[rstest]
    fn issued_tokens_verify_to_the_same_identity(clock: Arc<FixedClock>, identity: Identity) {
        let tokens = tokens(SECRET, &clock);
        let issued = tokens.issue(&identity).expect("issue");
        assert_eq!(issued.expires_at, clock.utc() + TimeDelta::hours(12));
        assert_eq!(tokens.verify(&issued.token).expect("verify"), identity);
    }

    #[rstest]
    fn token_is_valid_up_to_and_including_expiry(clock: Arc<FixedClock>, identity: Identity) {
        let tokens = tokens(SECRET, &clock);
        let issued = tokens.issue(&identity).expect("issue");

        clock.advance(TimeDelta::hours(12));
        assert!(tokens.verify(&issued.token).is_ok());

        clock.advance(TimeDelta::seconds(1));
        assert_eq!(
            tokens.verify(&issued.token),
            Err(SessionTokenError::Invalid)
        );
    }

    #[rstest]
    fn sub_second_issue_time_reports_the_signed_expiry(identity: Identity) {
        let start = Utc
            .with_ymd_and_hms(2026, 5, 1, 8, 0, 0)
            .single()
            .expect("fixture timestamp")
            + TimeDelta::milliseconds(750);
        let clock = Arc::new(FixedClock::new(start));
        let tokens = tokens(SECRET, &clock);
        let issued = tokens.issue(&identity).expect("issue");

        assert_eq!(issued.expires_at.timestamp_subsec_nanos(), 0);
        assert_eq!(
            issued.expires_at,
            start.trunc_subsecs(0) + TimeDelta::hours(12)
        );

        clock.advance(issued.expires_at - clock.utc());
        assert!(tokens.verify(&issued.token).is_ok());

        clock.advance(TimeDelta::seconds(1));
        assert_eq!(
            tokens.verify(&issued.token),
            Err(SessionTokenError::Invalid)
        );
    }

    #[rstest]
    fn other_secret_is_rejected(clock: Arc<FixedClock>, identity: Identity) {
        let issued = tokens(SECRET, &clock).issue(&identity).expect("issue");
        let other = tokens(b"ffffffffffffffffffffffffffffffff", &clock);
        assert_eq!(other.verify(&issued.token), Err(SessionTokenError::Invalid));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.jwt")]
    #[case("eyJhbGciOiJIUzI1NiJ9.e30.c2lnbmF0dXJl")]
    fn malformed_tokens_are_rejected(clock: Arc<FixedClock>, #[case] token: &str) {
        assert_eq!(
            tokens(SECRET, &clock).verify(token),
            Err(SessionTokenError::Invalid)
        );
    }

    #[rstest]
    fn tampered_payload_is_rejected(clock: Arc<FixedClock>, identity: Identity) {
        let tokens = tokens(SECRET, &clock);
        let issued = tokens.issue(&identity).expect("issue");
        let mut parts: Vec<String> = issued.token.split('.').map(str::to_owned).collect();
        parts[1].push('A');
        assert_eq!(tokens.verify(&parts.join(".")), Err(SessionTokenError::Invalid));
    }
}
