//! Token entities for the access/refresh token lifecycle.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Kind of credential a [`Token`] represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived signed credential; never persisted
    Access,
    /// Long-lived opaque credential; persisted and single-use
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single issued credential
///
/// Only refresh tokens are stored. `revoked` only ever moves from `false`
/// to `true`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    /// Unique identifier assigned at issuance
    pub token_id: Uuid,

    /// Owning identity
    pub user_id: Uuid,

    /// Bearer credential: a signed JWT for access tokens, random hex for
    /// refresh tokens
    pub value: String,

    pub token_type: TokenType,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,

    pub revoked: bool,
}

impl Token {
    /// Creates a new, unrevoked token
    ///
    /// # Arguments
    ///
    /// * `token_id` - Identifier for the record
    /// * `user_id` - The owning user's UUID
    /// * `value` - The bearer credential
    /// * `token_type` - Access or refresh
    /// * `issued_at` - Issuance instant
    /// * `expires_at` - Expiry instant, strictly after `issued_at`
    ///
    /// # Returns
    ///
    /// The token, or `DomainError::Validation` when the lifetime is empty
    pub fn new(
        token_id: Uuid,
        user_id: Uuid,
        value: String,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if expires_at <= issued_at {
            return Err(DomainError::Validation {
                message: format!(
                    "{} token must expire after it is issued",
                    token_type
                ),
            });
        }

        Ok(Self {
            token_id,
            user_id,
            value,
            token_type,
            issued_at,
            expires_at,
            revoked: false,
        })
    }

    /// A token is expired from its expiry instant onward
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    /// Neither expired nor revoked at `now`
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired(now) && !self.revoked
    }

    pub fn revoke(&mut self) {
        self.revoked = true;
    }

    /// Time remaining until expiration, or zero if already expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

// The value is a bearer credential and must not end up in logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("token_id", &self.token_id)
            .field("user_id", &self.user_id)
            .field("value", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("revoked", &self.revoked)
            .finish()
    }
}

/// One access and one refresh token minted in the same instant for the
/// same user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: Token,
    pub refresh: Token,
}

impl TokenPair {
    pub fn new(access: Token, refresh: Token) -> Self {
        Self { access, refresh }
    }

    pub fn user_id(&self) -> Uuid {
        self.access.user_id
    }

    pub fn access_token(&self) -> &str {
        &self.access.value
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh.value
    }
}

/// Claims carried inside a signed access token
///
/// Timestamps have second precision once they have been through a
/// sign/verify round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: Uuid,
    pub issuer: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    pub fn new(
        subject: Uuid,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject,
            issuer: issuer.into(),
            issued_at,
            expires_at,
        }
    }
}
