//! HS256 JWT implementation of the `TokenCodec` port.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{TokenCodec, TokenError};
use crate::domain::{AccountId, AccountName, BearerToken, Identity};

/// Lifetime of an issued token.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::hours(2);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: Uuid,
    account: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies HS256 tokens carrying `id` and `account` claims.
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenCodec {
    /// Codec keyed by `secret` with the default two hour lifetime.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(
        &self,
        identity: &Identity,
        issued_at: DateTime<Utc>,
    ) -> Result<BearerToken, TokenError> {
        let claims = Claims {
            id: *identity.id.as_uuid(),
            account: identity.account.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(BearerToken::new)
            .map_err(|err| TokenError::encode(err.to_string()))
    }

    fn verify(&self, token: &BearerToken) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token.as_str(), &self.decoding_key, &self.validation)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            })?;
        let account = AccountName::new(&data.claims.account)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        Ok(Identity {
            id: AccountId::from(data.claims.id),
            account,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[fixture]
    fn codec() -> JwtTokenCodec {
        JwtTokenCodec::new(SECRET)
    }

    #[fixture]
    fn identity() -> Identity {
        Identity {
            id: AccountId::random(),
            account: AccountName::new("alice").expect("valid name"),
        }
    }

    #[rstest]
    fn issued_tokens_verify_to_the_same_identity(codec: JwtTokenCodec, identity: Identity) {
        let token = codec.issue(&identity, Utc::now()).expect("issue");
        assert_eq!(codec.verify(&token).expect("verify"), identity);
    }

    #[rstest]
    fn expired_tokens_are_reported_as_expired(codec: JwtTokenCodec, identity: Identity) {
        let token = codec
            .issue(&identity, Utc::now() - Duration::hours(3))
            .expect("issue");
        assert_eq!(codec.verify(&token), Err(TokenError::expired()));
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_invalid(codec: JwtTokenCodec, identity: Identity) {
        let foreign = JwtTokenCodec::new(b"another-secret-another-secret-xx");
        let token = foreign.issue(&identity, Utc::now()).expect("issue");
        assert!(matches!(
            codec.verify(&token),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn tampered_tokens_are_invalid(codec: JwtTokenCodec, identity: Identity) {
        let token = codec.issue(&identity, Utc::now()).expect("issue");
        let mut tampered = token.as_str().to_owned();
        tampered.push('x');
        assert!(matches!(
            codec.verify(&BearerToken::new(tampered)),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn lifetime_is_two_hours_by_default(codec: JwtTokenCodec, identity: Identity) {
        let now = Utc::now();
        let token = codec.issue(&identity, now).expect("issue");
        let data = decode::<Claims>(token.as_str(), &codec.decoding_key, &codec.validation)
            .expect("decode");
        assert_eq!(data.claims.exp - data.claims.iat, 7200);
    }
}
