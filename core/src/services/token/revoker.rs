use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::errors::{DomainError, DomainResult};
use crate::repositories::RefreshTokenStore;
use crate::services::clock::Clock;

use super::traits::TokenRevoker;

/// Lenient logout: only an unknown value is an error
pub struct JwtTokenRevoker {
    store: Arc<dyn RefreshTokenStore>,
    clock: Arc<dyn Clock>,
}

impl JwtTokenRevoker {
    pub fn new(store: Arc<dyn RefreshTokenStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl TokenRevoker for JwtTokenRevoker {
    async fn revoke_refresh_token(&self, refresh_token: &str) -> DomainResult<()> {
        let token = self
            .store
            .get(refresh_token)
            .await
            .map_err(DomainError::not_found_as_invalid_token)?;

        if token.is_expired(self.clock.now()) || token.is_revoked() {
            debug!(token_id = %token.token_id, "Refresh token already unusable, nothing to revoke");
            return Ok(());
        }

        // Losing the race to another revoker or refresher leaves the token
        // revoked all the same.
        if self.store.try_revoke(refresh_token).await? {
            info!(user_id = %token.user_id, token_id = %token.token_id, "Revoked refresh token");
        }
        Ok(())
    }
}
