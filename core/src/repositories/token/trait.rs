//! Refresh token store trait, the single source of truth for refresh-token state.

use async_trait::async_trait;

use crate::domain::entities::Token;
use crate::errors::DomainResult;

/// Persistence contract for refresh tokens, keyed by token value
///
/// Implementations are shared between concurrent callers. `try_revoke` is
/// the only operation that mutates a stored token and it must be an atomic
/// conditional transition.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Look up a refresh token by its value
    ///
    /// # Arguments
    /// * `value` - The bearer value presented by the client
    ///
    /// # Returns
    /// * `Ok(Token)` - Token found, in whatever state it is in
    /// * `Err(DomainError::NotFound)` - No token was ever stored with this value
    /// * `Err(DomainError::Repository)` - Backend failure
    async fn get(&self, value: &str) -> DomainResult<Token>;

    /// Persist a newly issued refresh token
    ///
    /// # Arguments
    /// * `token` - The token to store
    ///
    /// # Returns
    /// * `Ok(())` - Stored
    /// * `Err(DomainError::Repository)` - A token with the same value already exists, or backend failure
    async fn add(&self, token: Token) -> DomainResult<()>;

    /// Mark a refresh token revoked if it is not already
    ///
    /// Compare-and-set on `revoked = false -> true`.
    ///
    /// # Arguments
    /// * `value` - The token value to revoke
    ///
    /// # Returns
    /// * `Ok(true)` - This caller performed the transition
    /// * `Ok(false)` - Already revoked, or no such token
    /// * `Err(DomainError::Repository)` - Backend failure
    ///
    /// # Example
    /// ```no_run
    /// # use tk_core::repositories::RefreshTokenStore;
    /// # async fn example(store: &dyn RefreshTokenStore) -> Result<(), Box<dyn std::error::Error>> {
    /// if store.try_revoke("3f9a...").await? {
    ///     println!("revoked by this call");
    /// } else {
    ///     println!("someone else got there first");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn try_revoke(&self, value: &str) -> DomainResult<bool>;
}
