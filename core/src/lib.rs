//! # Tokenkeep Core
//!
//! Domain layer of the token authority: entities, the error taxonomy,
//! boundary traits for stores and resolvers, and the services that issue,
//! rotate, revoke and introspect tokens.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{AuthTokens, Token, TokenClaims, TokenPair, TokenType, UserDescriptor};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{
    IdentityResolver, InMemoryIdentityResolver, InMemoryRefreshTokenStore, RefreshTokenStore,
};
pub use services::{
    CacheBackend, CachingIdentityResolver, Clock, InMemoryCacheBackend, SystemClock, TokenService,
    TokenServiceBuilder, TokenServiceConfig, TtlCache,
};
