//! Signed credential issuance and verification (HS256 JWT).

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl_secs: i64,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &[u8], issuer: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: issuer.to_owned(),
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Issue a credential for `subject` valid from now for the configured TTL.
    ///
    /// # Errors
    /// Returns `DomainError::Internal` if signing fails.
    pub fn issue(&self, subject: Uuid) -> Result<String, DomainError> {
        self.issue_at(subject, OffsetDateTime::now_utc())
    }

    fn issue_at(&self, subject: Uuid, now: OffsetDateTime) -> Result<String, DomainError> {
        let iat = now.unix_timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("token signing failed: {e}")))
    }

    /// Verify signature, issuer and expiry and return the subject.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidCredentials` for any token that does not verify.
    pub fn verify(&self, token: &str) -> Result<Uuid, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "token verification failed");
            DomainError::InvalidCredentials
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| DomainError::InvalidCredentials)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"test-secret", "client-manager", Duration::from_secs(3600))
    }

    #[test]
    fn issued_token_verifies_to_subject() {
        let tokens = issuer();
        let subject = Uuid::now_v7();

        let token = tokens.issue(subject).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), subject);
    }

    #[test]
    fn expired_token_rejected() {
        let tokens = issuer();
        let issued = OffsetDateTime::now_utc() - time::Duration::hours(2);

        let token = tokens.issue_at(Uuid::now_v7(), issued).unwrap();
        assert!(matches!(
            tokens.verify(&token),
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[test]
    fn foreign_secret_rejected() {
        let other = TokenIssuer::new(b"other-secret", "client-manager", Duration::from_secs(3600));
        let token = other.issue(Uuid::now_v7()).unwrap();

        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn foreign_issuer_rejected() {
        let other = TokenIssuer::new(b"test-secret", "someone-else", Duration::from_secs(3600));
        let token = other.issue(Uuid::now_v7()).unwrap();

        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn garbage_rejected() {
        assert!(issuer().verify("not.a.token").is_err());
        assert!(issuer().verify("").is_err());
    }
}
