//! HS256 bearer-token issue/verify on top of the claims model.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed token, wrong algorithm, or bad signature.
    #[error("token is malformed or has an invalid signature")]
    Invalid,

    /// Signature checked out but the claims window did not.
    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// HS256 signer/verifier bound to a shared secret.
///
/// Decoding only checks the signature; the time window is then validated
/// deterministically via [`validate_claims`], which keeps expiry behavior
/// unit-testable without clock mocking in the JWT library.
pub struct Hs256Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256Jwt {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Claims-window checks are ours; the library only verifies the
        // signature and algorithm.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint a token for `username`, valid from `now` for `ttl`.
    pub fn issue(
        &self,
        username: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = JwtClaims {
            sub: username.to_string(),
            issued_at: now,
            expires_at: now + ttl,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Invalid)
    }

    /// Verify signature and claims window, returning the claims.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
