use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::{Token, TokenClaims, TokenPair, TokenType};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::RefreshTokenStore;
use crate::services::clock::Clock;
use crate::services::generators::{IdGenerator, SecureRandomGenerator};

use super::config::TokenServiceConfig;
use super::signer::TokenSigner;
use super::traits::TokenIssuer;

/// Issues a signed JWT access token and an opaque, stored refresh token
pub struct JwtTokenIssuer {
    signer: Arc<TokenSigner>,
    store: Arc<dyn RefreshTokenStore>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn SecureRandomGenerator>,
    ids: Arc<dyn IdGenerator>,
    config: TokenServiceConfig,
}

impl JwtTokenIssuer {
    pub fn new(
        config: TokenServiceConfig,
        signer: Arc<TokenSigner>,
        store: Arc<dyn RefreshTokenStore>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn SecureRandomGenerator>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            signer,
            store,
            clock,
            random,
            ids,
            config,
        }
    }

    fn access_token(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> DomainResult<Token> {
        let expires_at = expiry(issued_at, self.config.access_token_ttl)?;
        let claims = TokenClaims::new(user_id, &self.config.issuer, issued_at, expires_at);
        let token_id = self.ids.create();
        let value = self.signer.sign_with_id(&claims, token_id)?;

        Token::new(
            token_id,
            user_id,
            value,
            TokenType::Access,
            issued_at,
            expires_at,
        )
    }

    fn refresh_token(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> DomainResult<Token> {
        Token::new(
            self.ids.create(),
            user_id,
            self.random.generate(self.config.refresh_token_bytes),
            TokenType::Refresh,
            issued_at,
            expiry(issued_at, self.config.refresh_token_ttl)?,
        )
    }
}

fn expiry(issued_at: DateTime<Utc>, ttl: Duration) -> DomainResult<DateTime<Utc>> {
    issued_at
        .checked_add_signed(ttl)
        .ok_or_else(|| DomainError::Internal {
            message: format!("Token expiry overflows the calendar: {} + {}", issued_at, ttl),
        })
}

#[async_trait]
impl TokenIssuer for JwtTokenIssuer {
    async fn issue_tokens(&self, user_id: Uuid) -> DomainResult<TokenPair> {
        let issued_at = self.clock.now();
        let access = self.access_token(user_id, issued_at)?;
        let refresh = self.refresh_token(user_id, issued_at)?;

        self.store.add(refresh.clone()).await?;

        info!(user_id = %user_id, token_id = %refresh.token_id, "Issued token pair");
        Ok(TokenPair::new(access, refresh))
    }
}
