//! MySQL-backed identity lookups

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tk_core::domain::entities::UserDescriptor;
use tk_core::errors::{DomainError, DomainResult};
use tk_core::repositories::IdentityResolver;

/// Reads descriptors from the `users` table
pub struct MySqlIdentityResolver {
    pool: MySqlPool,
}

impl MySqlIdentityResolver {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityResolver for MySqlIdentityResolver {
    async fn get_descriptor(&self, user_id: Uuid) -> DomainResult<UserDescriptor> {
        let row = sqlx::query("SELECT id, username FROM users WHERE id = ? LIMIT 1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::repository(format!("Database query failed: {}", e)))?;

        let Some(row) = row else {
            return Err(DomainError::not_found(format!("user {}", user_id)));
        };

        let username: String = row
            .try_get("username")
            .map_err(|e| DomainError::repository(format!("Failed to get username: {}", e)))?;

        Ok(UserDescriptor::new(user_id, username))
    }
}
