//! Identity lookup used to turn a token subject into a user descriptor.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::UserDescriptor;
use crate::errors::DomainResult;

/// Resolves a user id against the identity store
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Fetch the descriptor for a user
    ///
    /// # Returns
    /// * `Ok(UserDescriptor)` - User exists
    /// * `Err(DomainError::NotFound)` - No such user
    /// * `Err(DomainError::Repository)` - Backend failure
    async fn get_descriptor(&self, user_id: Uuid) -> DomainResult<UserDescriptor>;
}
