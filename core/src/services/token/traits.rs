//! Capability interfaces for the four token operations
//!
//! The concrete implementation behind each one is chosen when the
//! [`TokenService`](super::TokenService) is wired.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{TokenPair, UserDescriptor};
use crate::errors::DomainResult;

#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Mint an access/refresh pair for `user_id` and persist the refresh token
    async fn issue_tokens(&self, user_id: Uuid) -> DomainResult<TokenPair>;
}

#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Exchange a refresh token for a new pair; the presented token is
    /// consumed
    ///
    /// # Errors
    /// * `TokenError::InvalidToken` - Unknown value
    /// * `TokenError::TokenExpired` - Past its expiry
    /// * `TokenError::TokenRevoked` - Already used or revoked
    async fn refresh_tokens(&self, refresh_token: &str) -> DomainResult<TokenPair>;
}

#[async_trait]
pub trait TokenRevoker: Send + Sync {
    /// Revoke a refresh token; expired or already revoked tokens succeed
    /// without change
    ///
    /// # Errors
    /// * `TokenError::InvalidToken` - The value was never issued
    async fn revoke_refresh_token(&self, refresh_token: &str) -> DomainResult<()>;
}

#[async_trait]
pub trait TokenIntrospector: Send + Sync {
    /// Verify an access token and resolve its subject to a descriptor
    async fn extract_user(&self, access_token: &str) -> DomainResult<UserDescriptor>;

    /// Verify an access token and return its subject without a lookup
    async fn validate(&self, access_token: &str) -> DomainResult<Uuid>;

    /// `validate` collapsed to a boolean
    async fn is_token_valid(&self, access_token: &str) -> bool {
        self.validate(access_token).await.is_ok()
    }
}
