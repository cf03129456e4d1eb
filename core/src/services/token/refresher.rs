use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::entities::TokenPair;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::RefreshTokenStore;
use crate::services::clock::Clock;

use super::traits::{TokenIssuer, TokenRefresher};

/// Single-use refresh token rotation
///
/// The presented token is revoked through the store's conditional
/// transition before a new pair is issued. Of several concurrent calls with
/// the same value, only the one that wins the transition mints a pair.
pub struct JwtTokenRefresher {
    store: Arc<dyn RefreshTokenStore>,
    issuer: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl JwtTokenRefresher {
    pub fn new(
        store: Arc<dyn RefreshTokenStore>,
        issuer: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            issuer,
            clock,
        }
    }
}

#[async_trait]
impl TokenRefresher for JwtTokenRefresher {
    async fn refresh_tokens(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let token = self
            .store
            .get(refresh_token)
            .await
            .map_err(DomainError::not_found_as_invalid_token)?;

        if token.is_expired(self.clock.now()) {
            debug!(token_id = %token.token_id, "Refresh token expired");
            return Err(TokenError::TokenExpired.into());
        }

        if token.is_revoked() {
            warn!(
                user_id = %token.user_id,
                token_id = %token.token_id,
                "Revoked refresh token presented"
            );
            return Err(TokenError::TokenRevoked.into());
        }

        if !self.store.try_revoke(refresh_token).await? {
            warn!(
                user_id = %token.user_id,
                token_id = %token.token_id,
                "Refresh token consumed by a concurrent request"
            );
            return Err(TokenError::TokenRevoked.into());
        }

        let pair = self.issuer.issue_tokens(token.user_id).await?;
        info!(
            user_id = %token.user_id,
            rotated_from = %token.token_id,
            token_id = %pair.refresh.token_id,
            "Rotated refresh token"
        );
        Ok(pair)
    }
}
