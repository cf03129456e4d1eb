//! Unit tests for the TTL cache policy layer

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::UserDescriptor;
use crate::errors::DomainError;
use crate::services::cache::{CacheBackend, InMemoryCacheBackend, TtlCache};
use crate::services::clock::ManualClock;

use super::mocks::FailingCacheBackend;

fn setup(ttl_secs: u64) -> (Arc<ManualClock>, Arc<InMemoryCacheBackend>, TtlCache<UserDescriptor>) {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    let backend = Arc::new(InMemoryCacheBackend::with_clock(clock.clone()));
    let cache = TtlCache::new(backend.clone(), Duration::from_secs(ttl_secs));
    (clock, backend, cache)
}

#[tokio::test]
async fn test_set_then_get_until_ttl_elapses() {
    let (clock, _backend, cache) = setup(300);
    let descriptor = UserDescriptor::new(Uuid::new_v4(), "alice");

    cache.set_or_raise("k", &descriptor).await.unwrap();

    clock.advance(chrono::Duration::seconds(299));
    assert_eq!(cache.get("k").await, Some(descriptor));

    clock.advance(chrono::Duration::seconds(1));
    assert_eq!(cache.get("k").await, None);
}

#[tokio::test]
async fn test_get_or_raise_reports_miss_as_not_found() {
    let (_clock, _backend, cache) = setup(60);

    let result = cache.get_or_raise("absent").await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_failing_backend_fails_open() {
    let cache: TtlCache<UserDescriptor> =
        TtlCache::new(Arc::new(FailingCacheBackend), Duration::from_secs(60));
    let descriptor = UserDescriptor::new(Uuid::new_v4(), "bob");

    cache.set("k", &descriptor).await;
    assert_eq!(cache.get("k").await, None);
}

#[tokio::test]
async fn test_failing_backend_raises_on_strict_paths() {
    let cache: TtlCache<UserDescriptor> =
        TtlCache::new(Arc::new(FailingCacheBackend), Duration::from_secs(60));
    let descriptor = UserDescriptor::new(Uuid::new_v4(), "bob");

    assert!(matches!(
        cache.set_or_raise("k", &descriptor).await,
        Err(DomainError::Repository { .. })
    ));
    assert!(matches!(
        cache.get_or_raise("k").await,
        Err(DomainError::Repository { .. })
    ));
}

#[tokio::test]
async fn test_undecodable_entry_is_a_miss_on_lenient_path() {
    let (_clock, backend, cache) = setup(60);
    backend
        .set("k", "{not json", Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(cache.get("k").await, None);
    assert!(matches!(
        cache.get_or_raise("k").await,
        Err(DomainError::Repository { .. })
    ));
}

#[tokio::test]
async fn test_namespace_prefixes_backend_keys() {
    let (_clock, backend, cache) = setup(60);
    let cache = cache.with_namespace("tokenkeep:");
    let descriptor = UserDescriptor::new(Uuid::new_v4(), "carol");

    cache.set_or_raise("u1:descriptor", &descriptor).await.unwrap();

    assert!(backend.get("tokenkeep:u1:descriptor").await.unwrap().is_some());
    assert!(backend.get("u1:descriptor").await.unwrap().is_none());
    assert_eq!(cache.get("u1:descriptor").await, Some(descriptor));
}

#[test]
fn test_make_key_joins_parts() {
    assert_eq!(TtlCache::<UserDescriptor>::make_key(&["a", "b", "c"]), "a:b:c");
    assert_eq!(TtlCache::<UserDescriptor>::make_key(&["single"]), "single");
}

#[tokio::test]
async fn test_backend_rejects_ttl_past_calendar_end() {
    let (_clock, backend, _cache) = setup(60);

    let result = backend
        .set("k", "v", Duration::from_secs(1_000_000_000_000_000))
        .await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert_eq!(backend.get("k").await.unwrap(), None);
}
