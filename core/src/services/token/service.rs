//! Token service facade and its builder

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::UserDescriptor;
use crate::domain::value_objects::AuthTokens;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{IdentityResolver, RefreshTokenStore};
use crate::services::cache::{CacheBackend, CachingIdentityResolver, TtlCache};
use crate::services::clock::{Clock, SystemClock};
use crate::services::generators::{
    IdGenerator, OsRandomGenerator, SecureRandomGenerator, UuidV4Generator,
};

use super::config::TokenServiceConfig;
use super::introspector::JwtTokenIntrospector;
use super::issuer::JwtTokenIssuer;
use super::refresher::JwtTokenRefresher;
use super::revoker::JwtTokenRevoker;
use super::signer::TokenSigner;
use super::traits::{TokenIntrospector, TokenIssuer, TokenRefresher, TokenRevoker};

/// Default lifetime of cached user descriptors
const DEFAULT_DESCRIPTOR_TTL: Duration = Duration::from_secs(300);

/// The four token operations exposed to the transport layer
///
/// Cheap to clone; every capability sits behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
    issuer: Arc<dyn TokenIssuer>,
    refresher: Arc<dyn TokenRefresher>,
    revoker: Arc<dyn TokenRevoker>,
    introspector: Arc<dyn TokenIntrospector>,
}

impl TokenService {
    /// Assemble a service from explicit capability implementations
    pub fn new(
        issuer: Arc<dyn TokenIssuer>,
        refresher: Arc<dyn TokenRefresher>,
        revoker: Arc<dyn TokenRevoker>,
        introspector: Arc<dyn TokenIntrospector>,
    ) -> Self {
        Self {
            issuer,
            refresher,
            revoker,
            introspector,
        }
    }

    /// Start wiring the JWT-backed implementations
    pub fn builder(config: TokenServiceConfig) -> TokenServiceBuilder {
        TokenServiceBuilder::new(config)
    }

    /// Issue a fresh pair for a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's id in canonical UUID text form
    ///
    /// # Returns
    ///
    /// * `Ok(AuthTokens)` - The new pair
    /// * `Err(DomainError::Validation)` - `user_id` is not a UUID
    /// * `Err(DomainError::Repository)` - The refresh token could not be stored
    pub async fn issue_tokens(&self, user_id: &str) -> DomainResult<AuthTokens> {
        let user_id = Uuid::parse_str(user_id).map_err(|_| DomainError::Validation {
            message: format!("Invalid user_id format: {}", user_id),
        })?;

        self.issue_tokens_for(user_id).await
    }

    pub async fn issue_tokens_for(&self, user_id: Uuid) -> DomainResult<AuthTokens> {
        self.issuer.issue_tokens(user_id).await.map(AuthTokens::from)
    }

    /// Rotate a refresh token into a new pair
    pub async fn refresh_tokens(&self, refresh_token: &str) -> DomainResult<AuthTokens> {
        self.refresher
            .refresh_tokens(refresh_token)
            .await
            .map(AuthTokens::from)
    }

    /// Revoke a refresh token (logout)
    pub async fn revoke_token(&self, refresh_token: &str) -> DomainResult<()> {
        self.revoker.revoke_refresh_token(refresh_token).await
    }

    /// Resolve an access token to the user it was issued for
    pub async fn introspect_token(&self, access_token: &str) -> DomainResult<UserDescriptor> {
        self.introspector.extract_user(access_token).await
    }

    /// Verify an access token without resolving the user
    pub async fn validate(&self, access_token: &str) -> DomainResult<Uuid> {
        self.introspector.validate(access_token).await
    }

    pub async fn is_token_valid(&self, access_token: &str) -> bool {
        self.introspector.is_token_valid(access_token).await
    }
}

/// Wires the JWT implementations of each capability around shared
/// collaborators
///
/// The store and the identity resolver are required. Clock, random and id
/// generators default to the system implementations. When a descriptor
/// cache backend is supplied the resolver is wrapped in a
/// [`CachingIdentityResolver`].
pub struct TokenServiceBuilder {
    config: TokenServiceConfig,
    store: Option<Arc<dyn RefreshTokenStore>>,
    resolver: Option<Arc<dyn IdentityResolver>>,
    clock: Option<Arc<dyn Clock>>,
    random: Option<Arc<dyn SecureRandomGenerator>>,
    ids: Option<Arc<dyn IdGenerator>>,
    descriptor_cache: Option<Arc<dyn CacheBackend>>,
    descriptor_ttl: Duration,
    cache_namespace: String,
}

impl TokenServiceBuilder {
    pub fn new(config: TokenServiceConfig) -> Self {
        Self {
            config,
            store: None,
            resolver: None,
            clock: None,
            random: None,
            ids: None,
            descriptor_cache: None,
            descriptor_ttl: DEFAULT_DESCRIPTOR_TTL,
            cache_namespace: String::new(),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn RefreshTokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn IdentityResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_random_generator(mut self, random: Arc<dyn SecureRandomGenerator>) -> Self {
        self.random = Some(random);
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Cache resolved descriptors in `backend` for `ttl`
    pub fn with_descriptor_cache(mut self, backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        self.descriptor_cache = Some(backend);
        self.descriptor_ttl = ttl;
        self
    }

    /// Key prefix for descriptor cache entries
    pub fn with_cache_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.cache_namespace = namespace.into();
        self
    }

    pub fn build(self) -> DomainResult<TokenService> {
        self.config.validate()?;

        let store = self.store.ok_or_else(|| DomainError::Internal {
            message: "TokenServiceBuilder requires a refresh token store".to_string(),
        })?;
        let resolver = self.resolver.ok_or_else(|| DomainError::Internal {
            message: "TokenServiceBuilder requires an identity resolver".to_string(),
        })?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let random = self.random.unwrap_or_else(|| Arc::new(OsRandomGenerator));
        let ids = self.ids.unwrap_or_else(|| Arc::new(UuidV4Generator));

        let resolver: Arc<dyn IdentityResolver> = match self.descriptor_cache {
            Some(backend) => {
                debug!(
                    ttl_secs = self.descriptor_ttl.as_secs(),
                    "Descriptor cache enabled"
                );
                let cache = TtlCache::new(backend, self.descriptor_ttl)
                    .with_namespace(self.cache_namespace);
                Arc::new(CachingIdentityResolver::new(resolver, cache))
            }
            None => resolver,
        };

        let signer = Arc::new(TokenSigner::new(&self.config, clock.clone()));
        let issuer: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(
            self.config,
            signer.clone(),
            store.clone(),
            clock.clone(),
            random,
            ids,
        ));
        let refresher = Arc::new(JwtTokenRefresher::new(
            store.clone(),
            issuer.clone(),
            clock.clone(),
        ));
        let revoker = Arc::new(JwtTokenRevoker::new(store, clock));
        let introspector = Arc::new(JwtTokenIntrospector::new(signer, resolver));

        Ok(TokenService::new(issuer, refresher, revoker, introspector))
    }
}
