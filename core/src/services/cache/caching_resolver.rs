use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::UserDescriptor;
use crate::errors::DomainResult;
use crate::repositories::IdentityResolver;

use super::ttl_cache::TtlCache;

/// Read-through cache in front of another [`IdentityResolver`]
///
/// Hits never reach the inner resolver. Misses are fetched, written back
/// best-effort, and returned whether or not the write succeeded. Errors from
/// the inner resolver pass through untouched.
pub struct CachingIdentityResolver {
    inner: Arc<dyn IdentityResolver>,
    cache: TtlCache<UserDescriptor>,
}

impl CachingIdentityResolver {
    pub fn new(inner: Arc<dyn IdentityResolver>, cache: TtlCache<UserDescriptor>) -> Self {
        Self { inner, cache }
    }

    /// `<user_id>:descriptor`
    pub fn descriptor_key(user_id: Uuid) -> String {
        TtlCache::<UserDescriptor>::make_key(&[&user_id.to_string(), "descriptor"])
    }
}

#[async_trait]
impl IdentityResolver for CachingIdentityResolver {
    async fn get_descriptor(&self, user_id: Uuid) -> DomainResult<UserDescriptor> {
        let key = Self::descriptor_key(user_id);

        if let Some(descriptor) = self.cache.get(&key).await {
            debug!(user_id = %user_id, "Descriptor cache hit");
            return Ok(descriptor);
        }

        debug!(user_id = %user_id, "Descriptor cache miss");
        let descriptor = self.inner.get_descriptor(user_id).await?;
        self.cache.set(&key, &descriptor).await;
        Ok(descriptor)
    }
}
