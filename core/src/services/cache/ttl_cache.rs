use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{DomainError, DomainResult};

use super::backend::CacheBackend;

/// Typed read/write policy over a [`CacheBackend`]
///
/// Every entry is written with the same TTL. Values travel as JSON. The
/// lenient `get`/`set` pair fails open: backend and serialization errors are
/// logged and treated as a miss or a skipped write. The `*_or_raise` pair
/// surfaces them.
pub struct TtlCache<T> {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
    namespace: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TtlCache<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self {
            backend,
            ttl,
            namespace: None,
            _marker: PhantomData,
        }
    }

    /// Prefix every key with `<namespace>:`; an empty namespace is ignored
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let trimmed = namespace.trim_end_matches(':');
        self.namespace = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Join key parts with `:`
    pub fn make_key(parts: &[&str]) -> String {
        parts.join(":")
    }

    fn full_key(&self, key: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{}:{}", ns, key),
            None => key.to_string(),
        }
    }

    /// Cached value, or `None` on a miss or any failure
    pub async fn get(&self, key: &str) -> Option<T> {
        match self.get_or_raise(key).await {
            Ok(value) => Some(value),
            Err(DomainError::NotFound { .. }) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    /// Cached value
    ///
    /// # Returns
    /// * `Ok(value)` - Hit
    /// * `Err(DomainError::NotFound)` - Miss or expired
    /// * `Err(DomainError::Repository)` - Backend failure or undecodable entry
    pub async fn get_or_raise(&self, key: &str) -> DomainResult<T> {
        let full_key = self.full_key(key);
        let raw = self
            .backend
            .get(&full_key)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("cache entry {}", full_key)))?;

        serde_json::from_str(&raw).map_err(|e| DomainError::Repository {
            message: format!("Failed to decode cache entry {}: {}", full_key, e),
        })
    }

    /// Best-effort write
    pub async fn set(&self, key: &str, value: &T) {
        if let Err(e) = self.set_or_raise(key, value).await {
            warn!(key = %key, error = %e, "Cache write failed, skipping");
        }
    }

    pub async fn set_or_raise(&self, key: &str, value: &T) -> DomainResult<()> {
        let full_key = self.full_key(key);
        let raw = serde_json::to_string(value).map_err(|e| DomainError::Repository {
            message: format!("Failed to encode cache entry {}: {}", full_key, e),
        })?;

        self.backend.set(&full_key, &raw, self.ttl).await?;
        debug!(key = %full_key, ttl_secs = self.ttl.as_secs(), "Cache entry written");
        Ok(())
    }
}
