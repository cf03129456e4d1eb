//! Process-local refresh token store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Token;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::RefreshTokenStore;

/// Refresh token store backed by a `HashMap` behind a tokio `RwLock`
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenStore {
    tokens: Arc<RwLock<HashMap<String, Token>>>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens, revoked ones included
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn get(&self, value: &str) -> DomainResult<Token> {
        let tokens = self.tokens.read().await;
        tokens
            .get(value)
            .cloned()
            .ok_or_else(|| DomainError::not_found("refresh token"))
    }

    async fn add(&self, token: Token) -> DomainResult<()> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.value) {
            return Err(DomainError::repository("Refresh token value already stored"));
        }

        tokens.insert(token.value.clone(), token);
        Ok(())
    }

    async fn try_revoke(&self, value: &str) -> DomainResult<bool> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(value) {
            Some(token) if !token.revoked => {
                token.revoke();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
