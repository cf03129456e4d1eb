//! # Infrastructure Layer
//!
//! Concrete adapters for the boundary traits defined in `tk_core`:
//!
//! - **Database**: MySQL refresh token store and identity resolver (SQLx)
//! - **Cache**: Redis client used as the descriptor cache backend
//! - **Health**: liveness of whichever of those backends were connected
//!
//! [`initialize`] picks an implementation for each collaborator from
//! [`StorageConfig`](tk_shared::config::StorageConfig).

pub mod cache;
pub mod database;
pub mod health;

use std::sync::Arc;

use tk_core::errors::DomainError;
use tk_core::repositories::{
    IdentityResolver, InMemoryIdentityResolver, InMemoryRefreshTokenStore, RefreshTokenStore,
};
use tk_core::services::cache::{CacheBackend, InMemoryCacheBackend};
use tk_shared::config::{AppConfig, StorageBackend};

use crate::cache::RedisClient;
use crate::database::{DatabasePool, MySqlIdentityResolver, MySqlRefreshTokenStore};

pub use health::{ComponentHealth, HealthReport};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Repository {
            message: err.to_string(),
        }
    }
}

/// Backends selected for one process
pub struct Infrastructure {
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
    pub identities: Arc<dyn IdentityResolver>,
    pub descriptor_cache: Arc<dyn CacheBackend>,
    /// Present when a MySQL backend was selected
    pub database: Option<DatabasePool>,
    /// Present when Redis was selected for the cache
    pub redis: Option<RedisClient>,
}

impl Infrastructure {
    /// Everything in process memory, with nothing to health-check
    pub fn in_memory() -> Self {
        Self {
            refresh_tokens: Arc::new(InMemoryRefreshTokenStore::new()),
            identities: Arc::new(InMemoryIdentityResolver::new()),
            descriptor_cache: Arc::new(InMemoryCacheBackend::new()),
            database: None,
            redis: None,
        }
    }

    /// Release pooled connections
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.database {
            pool.close().await;
        }
    }
}

/// Connect the backends named in `config.storage`
///
/// MySQL is only connected (and migrated) when a store or resolver needs it;
/// Redis only when it backs the cache.
pub async fn initialize(config: &AppConfig) -> Result<Infrastructure, InfrastructureError> {
    tracing::info!(
        refresh_tokens = ?config.storage.refresh_tokens,
        identities = ?config.storage.identities,
        cache = ?config.storage.cache,
        "Initializing infrastructure"
    );

    let database = if config.storage.needs_database() {
        let pool = DatabasePool::new(config.database.clone()).await?;
        pool.run_migrations().await?;
        Some(pool)
    } else {
        None
    };

    let refresh_tokens: Arc<dyn RefreshTokenStore> =
        match (config.storage.refresh_tokens, &database) {
            (StorageBackend::Memory, _) => Arc::new(InMemoryRefreshTokenStore::new()),
            (StorageBackend::MySql, Some(pool)) => {
                Arc::new(MySqlRefreshTokenStore::new(pool.get_pool().clone()))
            }
            (backend, _) => return Err(unsupported("refresh token store", backend)),
        };

    let identities: Arc<dyn IdentityResolver> = match (config.storage.identities, &database) {
        (StorageBackend::Memory, _) => {
            tracing::warn!("In-memory identity store starts empty; introspection will not resolve users");
            Arc::new(InMemoryIdentityResolver::new())
        }
        (StorageBackend::MySql, Some(pool)) => {
            Arc::new(MySqlIdentityResolver::new(pool.get_pool().clone()))
        }
        (backend, _) => return Err(unsupported("identity resolver", backend)),
    };

    let (descriptor_cache, redis): (Arc<dyn CacheBackend>, Option<RedisClient>) =
        match config.storage.cache {
            StorageBackend::Memory => (Arc::new(InMemoryCacheBackend::new()), None),
            StorageBackend::Redis => {
                let client = RedisClient::new(config.cache.clone()).await?;
                (Arc::new(client.clone()), Some(client))
            }
            backend => return Err(unsupported("descriptor cache", backend)),
        };

    tracing::info!("Infrastructure initialized");

    Ok(Infrastructure {
        refresh_tokens,
        identities,
        descriptor_cache,
        database,
        redis,
    })
}

fn unsupported(role: &str, backend: StorageBackend) -> InfrastructureError {
    InfrastructureError::Config(format!("{:?} cannot back the {}", backend, role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tk_shared::config::StorageConfig;

    #[tokio::test]
    async fn test_initialize_in_memory_needs_no_servers() {
        let mut config = AppConfig::development();
        config.storage = StorageConfig::in_memory();

        let infra = initialize(&config).await.unwrap();

        assert!(infra.database.is_none());
        assert!(infra.redis.is_none());
    }

    #[tokio::test]
    async fn test_initialize_rejects_redis_token_store() {
        let mut config = AppConfig::development();
        config.storage.refresh_tokens = StorageBackend::Redis;

        let result = initialize(&config).await;

        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[tokio::test]
    async fn test_initialize_rejects_mysql_cache() {
        let mut config = AppConfig::development();
        config.storage.cache = StorageBackend::MySql;

        // The MySQL pool is not requested for the cache, so this fails on
        // backend selection rather than on connecting.
        let result = initialize(&config).await;

        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[test]
    fn test_infrastructure_error_becomes_repository_error() {
        let err: DomainError = InfrastructureError::Config("bad".to_string()).into();
        assert!(matches!(err, DomainError::Repository { .. }));
    }
}
