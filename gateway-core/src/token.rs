//! Bearer credential issuer.
//!
//! Mints and verifies the signed, time-limited credential handed to the
//! frontend. The credential embeds the opaque merchant token and the
//! perimeter id; verifying it recovers both without any table lookup.

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use gateway_types::TokenError;

/// Payload of the bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Opaque token returned by the merchant platform.
    pub merchant_token: String,
    /// Perimeter id carried alongside the token.
    pub perimetre: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Signs and verifies bearer credentials with a shared secret (HS256).
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Creates an issuer with the given secret and time-to-live.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: a credential past `exp` is expired, full stop.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issues a credential wrapping the merchant token and perimeter.
    pub fn issue(&self, merchant_token: &str, perimetre: &str) -> Result<String, TokenError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            merchant_token: merchant_token.to_string(),
            perimetre: perimetre.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Malformed)
    }

    /// Verifies a credential and returns its payload.
    ///
    /// All three failure cases are rejected identically by callers; the
    /// variant feeds logs and tests.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", Duration::hours(24))
    }

    #[test]
    fn test_verify_roundtrip_returns_exact_pair() {
        let issuer = issuer();
        let token = issuer.issue("up123", "10034").unwrap();

        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.merchant_token, "up123");
        assert_eq!(claims.perimetre, "10034");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_expired_token() {
        // Negative TTL puts `exp` in the past at issue time.
        let issuer = TokenIssuer::new("test-secret", Duration::hours(-1));
        let token = issuer.issue("up123", "10034").unwrap();

        assert_eq!(issuer.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let token = issuer().issue("up123", "10034").unwrap();
        let other = TokenIssuer::new("other-secret", Duration::hours(24));

        assert_eq!(other.verify(&token), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        assert_eq!(
            issuer().verify("not-a-jwt"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_verify_tampered_payload() {
        let token = issuer().issue("up123", "10034").unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = "eyJtZXJjaGFudF90b2tlbiI6ImV2aWwifQ";
        parts[1] = forged;
        let tampered = parts.join(".");

        assert!(issuer().verify(&tampered).is_err());
    }
}
