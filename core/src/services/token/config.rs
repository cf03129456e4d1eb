//! Configuration for the token service

use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use tk_shared::config::JwtConfig;

use crate::errors::{DomainError, DomainResult};

/// Refresh values shorter than this are rejected as guessable
const MIN_REFRESH_TOKEN_BYTES: usize = 16;

/// Longest accepted lifetime for either token kind
const MAX_TOKEN_TTL_DAYS: i64 = 3650;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Expected `iss` claim
    pub issuer: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
    /// Random bytes per refresh token value
    pub refresh_token_bytes: usize,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: "tokenkeep".to_string(),
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::days(7),
            refresh_token_bytes: 64,
        }
    }
}

impl TokenServiceConfig {
    /// Build from the shared JWT settings, rejecting unusable values
    pub fn from_jwt_config(jwt: &JwtConfig) -> DomainResult<Self> {
        let algorithm = Algorithm::from_str(&jwt.algorithm).map_err(|_| DomainError::Internal {
            message: format!("Unknown JWT algorithm: {}", jwt.algorithm),
        })?;

        let ttl = |seconds: i64, kind: &str| {
            Duration::try_seconds(seconds).ok_or_else(|| DomainError::Internal {
                message: format!("{} token expiry out of range: {}s", kind, seconds),
            })
        };

        let config = Self {
            jwt_secret: jwt.secret.clone(),
            algorithm,
            issuer: jwt.issuer.clone(),
            access_token_ttl: ttl(jwt.access_token_expiry, "access")?,
            refresh_token_ttl: ttl(jwt.refresh_token_expiry, "refresh")?,
            refresh_token_bytes: jwt.refresh_token_bytes,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        let invalid = |message: &str| {
            Err(DomainError::Internal {
                message: format!("Invalid token configuration: {}", message),
            })
        };

        if self.jwt_secret.is_empty() {
            return invalid("JWT secret must not be empty");
        }
        if !matches!(
            self.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return invalid("only HMAC algorithms (HS256, HS384, HS512) are supported");
        }
        if self.issuer.is_empty() {
            return invalid("issuer must not be empty");
        }
        if self.access_token_ttl <= Duration::zero() {
            return invalid("access token TTL must be positive");
        }
        if self.refresh_token_ttl <= Duration::zero() {
            return invalid("refresh token TTL must be positive");
        }
        let max_ttl = Duration::days(MAX_TOKEN_TTL_DAYS);
        if self.access_token_ttl > max_ttl || self.refresh_token_ttl > max_ttl {
            return invalid("token TTLs must not exceed 3650 days");
        }
        if self.refresh_token_bytes < MIN_REFRESH_TOKEN_BYTES {
            return invalid("refresh tokens need at least 16 random bytes");
        }
        Ok(())
    }
}
