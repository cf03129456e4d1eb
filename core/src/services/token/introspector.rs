use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::UserDescriptor;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::IdentityResolver;

use super::signer::TokenSigner;
use super::traits::TokenIntrospector;

/// Verifies access tokens locally and resolves their subject
///
/// `resolver` is normally a
/// [`CachingIdentityResolver`](crate::services::cache::CachingIdentityResolver).
pub struct JwtTokenIntrospector {
    signer: Arc<TokenSigner>,
    resolver: Arc<dyn IdentityResolver>,
}

impl JwtTokenIntrospector {
    pub fn new(signer: Arc<TokenSigner>, resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { signer, resolver }
    }
}

#[async_trait]
impl TokenIntrospector for JwtTokenIntrospector {
    async fn extract_user(&self, access_token: &str) -> DomainResult<UserDescriptor> {
        let claims = self.signer.verify(access_token)?;

        // A valid token naming a missing user is a data anomaly, not a
        // client error.
        self.resolver
            .get_descriptor(claims.subject)
            .await
            .map_err(|e| match e {
                DomainError::NotFound { .. } => DomainError::Repository {
                    message: format!("decoded user_id {} is not found", claims.subject),
                },
                other => other,
            })
    }

    async fn validate(&self, access_token: &str) -> DomainResult<Uuid> {
        self.signer.verify(access_token).map(|claims| claims.subject)
    }
}
