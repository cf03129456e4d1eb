//! Access token encoding and verification

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::TokenClaims;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::clock::Clock;

use super::config::TokenServiceConfig;

/// Wire form of the access token payload
#[derive(Debug, Serialize, Deserialize)]
struct JwtPayload {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jti: Option<String>,
}

/// Signs and verifies access tokens with a shared HMAC secret
///
/// Expiry is checked against the injected clock rather than by
/// `jsonwebtoken`, so that an expired token is only reported as
/// `TokenExpired` once its signature and claims have been validated.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenSigner {
    pub fn new(config: &TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(config.algorithm),
            validation,
            clock,
        }
    }

    /// Encode `claims` into a compact signed token
    ///
    /// Timestamps are truncated to whole seconds.
    pub fn sign(&self, claims: &TokenClaims) -> DomainResult<String> {
        self.encode_payload(claims, None)
    }

    /// Like [`sign`](Self::sign), also embedding `token_id` as `jti` so that
    /// pairs minted in the same second still differ
    pub(crate) fn sign_with_id(&self, claims: &TokenClaims, token_id: Uuid) -> DomainResult<String> {
        self.encode_payload(claims, Some(token_id))
    }

    fn encode_payload(&self, claims: &TokenClaims, token_id: Option<Uuid>) -> DomainResult<String> {
        let payload = JwtPayload {
            sub: claims.subject.to_string(),
            iss: claims.issuer.clone(),
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
            jti: token_id.map(|id| id.to_string()),
        };

        encode(&self.header, &payload, &self.encoding_key).map_err(|e| DomainError::Internal {
            message: format!("Failed to sign access token: {}", e),
        })
    }

    /// Decode and validate an access token
    ///
    /// # Returns
    ///
    /// * `Ok(TokenClaims)` - Signature, issuer and claims are valid and the
    ///   token has not expired
    /// * `Err(TokenError::InvalidToken)` - Bad signature, wrong algorithm,
    ///   issuer mismatch, missing or malformed claim, non-UUID subject
    /// * `Err(TokenError::TokenExpired)` - Otherwise valid but `now > exp`
    pub fn verify(&self, token: &str) -> DomainResult<TokenClaims> {
        let data = decode::<JwtPayload>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "Access token rejected");
            DomainError::Token(TokenError::InvalidToken)
        })?;
        let payload = data.claims;

        let subject = Uuid::parse_str(&payload.sub).map_err(|_| {
            debug!("Access token subject is not a UUID");
            DomainError::Token(TokenError::InvalidToken)
        })?;
        let issued_at = from_timestamp(payload.iat)?;
        let expires_at = from_timestamp(payload.exp)?;

        if self.clock.now() > expires_at {
            debug!(user_id = %subject, "Access token expired");
            return Err(TokenError::TokenExpired.into());
        }

        Ok(TokenClaims {
            subject,
            issuer: payload.iss,
            issued_at,
            expires_at,
        })
    }
}

fn from_timestamp(secs: i64) -> DomainResult<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or(DomainError::Token(TokenError::InvalidToken))
}
