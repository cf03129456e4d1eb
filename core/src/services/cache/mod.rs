//! Descriptor caching: a string key/value backend, a typed TTL policy layer
//! over it, and a read-through decorator for identity resolvers.

mod backend;
mod caching_resolver;
mod ttl_cache;

#[cfg(test)]
mod tests;

pub use backend::{CacheBackend, InMemoryCacheBackend};
pub use caching_resolver::CachingIdentityResolver;
pub use ttl_cache::TtlCache;
