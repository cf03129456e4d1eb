//! Process-local identity resolver

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::UserDescriptor;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::IdentityResolver;

/// Identity resolver over a fixed, mutable set of descriptors
#[derive(Clone, Default)]
pub struct InMemoryIdentityResolver {
    users: Arc<RwLock<HashMap<Uuid, UserDescriptor>>>,
}

impl InMemoryIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resolver pre-populated with `descriptors`
    pub fn with_users(descriptors: impl IntoIterator<Item = UserDescriptor>) -> Self {
        let users = descriptors
            .into_iter()
            .map(|d| (d.user_id, d))
            .collect::<HashMap<_, _>>();

        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Insert or replace a descriptor
    pub async fn insert(&self, descriptor: UserDescriptor) {
        self.users.write().await.insert(descriptor.user_id, descriptor);
    }

    /// Remove a user; later lookups miss
    pub async fn remove(&self, user_id: Uuid) -> Option<UserDescriptor> {
        self.users.write().await.remove(&user_id)
    }
}

#[async_trait]
impl IdentityResolver for InMemoryIdentityResolver {
    async fn get_descriptor(&self, user_id: Uuid) -> DomainResult<UserDescriptor> {
        self.users
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("user {}", user_id)))
    }
}
