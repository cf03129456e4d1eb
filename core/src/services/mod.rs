//! Services implementing the token lifecycle and its supporting collaborators.

pub mod cache;
pub mod clock;
pub mod generators;
pub mod token;

// Re-export commonly used types
pub use cache::{CacheBackend, CachingIdentityResolver, InMemoryCacheBackend, TtlCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use generators::{IdGenerator, OsRandomGenerator, SecureRandomGenerator, UuidV4Generator};
pub use token::{
    JwtTokenIntrospector, JwtTokenIssuer, JwtTokenRefresher, JwtTokenRevoker, TokenIntrospector,
    TokenIssuer, TokenRefresher, TokenRevoker, TokenService, TokenServiceBuilder,
    TokenServiceConfig, TokenSigner,
};
