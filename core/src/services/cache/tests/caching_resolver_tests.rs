//! Unit tests for the read-through identity resolver

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::repositories::IdentityResolver;
use crate::services::cache::{CachingIdentityResolver, InMemoryCacheBackend, TtlCache};
use crate::services::clock::ManualClock;

use super::mocks::{CountingResolver, FailingCacheBackend, ReadOnlyCacheBackend};

#[test]
fn test_descriptor_key_format() {
    let user_id = Uuid::new_v4();
    assert_eq!(
        CachingIdentityResolver::descriptor_key(user_id),
        format!("{}:descriptor", user_id)
    );
}

#[tokio::test]
async fn test_second_lookup_is_served_from_cache() {
    let user_id = Uuid::new_v4();
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    let inner = Arc::new(CountingResolver::with_user(user_id, "alice"));
    let backend = Arc::new(InMemoryCacheBackend::with_clock(clock.clone()));
    let resolver = CachingIdentityResolver::new(
        inner.clone(),
        TtlCache::new(backend, Duration::from_secs(300)),
    );

    let first = resolver.get_descriptor(user_id).await.unwrap();
    let second = resolver.get_descriptor(user_id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(inner.calls(), 1);
}

#[tokio::test]
async fn test_expired_entry_triggers_refetch() {
    let user_id = Uuid::new_v4();
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    let inner = Arc::new(CountingResolver::with_user(user_id, "alice"));
    let backend = Arc::new(InMemoryCacheBackend::with_clock(clock.clone()));
    let resolver = CachingIdentityResolver::new(
        inner.clone(),
        TtlCache::new(backend, Duration::from_secs(300)),
    );

    resolver.get_descriptor(user_id).await.unwrap();
    clock.advance(chrono::Duration::seconds(301));
    resolver.get_descriptor(user_id).await.unwrap();

    assert_eq!(inner.calls(), 2);
}

#[tokio::test]
async fn test_unreachable_cache_falls_through_to_resolver() {
    let user_id = Uuid::new_v4();
    let inner = Arc::new(CountingResolver::with_user(user_id, "dave"));
    let resolver = CachingIdentityResolver::new(
        inner.clone(),
        TtlCache::new(Arc::new(FailingCacheBackend), Duration::from_secs(300)),
    );

    let descriptor = resolver.get_descriptor(user_id).await.unwrap();

    assert_eq!(descriptor.username, "dave");
    assert_eq!(inner.calls(), 1);
}

#[tokio::test]
async fn test_failed_populate_still_returns_value() {
    let user_id = Uuid::new_v4();
    let inner = Arc::new(CountingResolver::with_user(user_id, "erin"));
    let resolver = CachingIdentityResolver::new(
        inner.clone(),
        TtlCache::new(Arc::new(ReadOnlyCacheBackend), Duration::from_secs(300)),
    );

    assert_eq!(resolver.get_descriptor(user_id).await.unwrap().username, "erin");
    assert_eq!(resolver.get_descriptor(user_id).await.unwrap().username, "erin");
    assert_eq!(inner.calls(), 2);
}

#[tokio::test]
async fn test_inner_miss_propagates() {
    let inner = Arc::new(CountingResolver::with_user(Uuid::new_v4(), "frank"));
    let resolver = CachingIdentityResolver::new(
        inner,
        TtlCache::new(Arc::new(InMemoryCacheBackend::new()), Duration::from_secs(300)),
    );

    let result = resolver.get_descriptor(Uuid::new_v4()).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
