use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::errors::{DomainError, DomainResult};
use crate::services::clock::{Clock, SystemClock};

/// Keyed string store with per-entry expiry
///
/// Shared by many callers; concurrent writes to one key may overwrite each
/// other.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetch a live entry
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Entry present and not expired
    /// * `Ok(None)` - Miss
    /// * `Err(DomainError::Repository)` - Backend failure
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Store `value` under `key` for `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()>;
}

/// Process-local cache whose entries expire against an injected clock
pub struct InMemoryCacheBackend {
    entries: Arc<RwLock<HashMap<String, (String, DateTime<Utc>)>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCacheBackend {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

impl Default for InMemoryCacheBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for InMemoryCacheBackend {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let now = self.clock.now();
        let entries = self.entries.read().await;

        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| now < *expires_at)
            .map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()> {
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| DomainError::Internal {
            message: format!("Cache TTL out of range: {}", e),
        })?;
        let now = self.clock.now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| DomainError::Internal {
            message: format!("Cache TTL overflows the calendar: {}", ttl),
        })?;

        let mut entries = self.entries.write().await;
        // Sweep dead entries on write so the map does not grow without bound.
        entries.retain(|_, (_, exp)| now < *exp);
        entries.insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }
}
