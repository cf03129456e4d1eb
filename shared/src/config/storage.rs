//! Backend selection for the refresh-token store, identity lookups and the
//! descriptor cache

use serde::{Deserialize, Serialize};

use super::env_or;

/// Storage backend enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local storage, lost on restart
    Memory,
    /// MySQL via the shared connection pool
    MySql,
    /// Redis (cache only)
    Redis,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "mysql" => Ok(StorageBackend::MySql),
            "redis" => Ok(StorageBackend::Redis),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Which backend serves each collaborator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Refresh-token store (memory or mysql)
    pub refresh_tokens: StorageBackend,

    /// Identity resolver (memory or mysql)
    pub identities: StorageBackend,

    /// Descriptor cache backend (memory or redis)
    pub cache: StorageBackend,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl StorageConfig {
    /// Everything in process memory
    pub fn in_memory() -> Self {
        Self {
            refresh_tokens: StorageBackend::Memory,
            identities: StorageBackend::Memory,
            cache: StorageBackend::Memory,
        }
    }

    /// MySQL for stores, Redis for the cache
    pub fn persistent() -> Self {
        Self {
            refresh_tokens: StorageBackend::MySql,
            identities: StorageBackend::MySql,
            cache: StorageBackend::Redis,
        }
    }

    /// Override `base` from `TOKEN_STORE`, `IDENTITY_STORE` and `CACHE_BACKEND`
    pub fn from_env(base: Self) -> Self {
        Self {
            refresh_tokens: env_or("TOKEN_STORE", base.refresh_tokens),
            identities: env_or("IDENTITY_STORE", base.identities),
            cache: env_or("CACHE_BACKEND", base.cache),
        }
    }

    /// Whether any backend needs the MySQL pool
    pub fn needs_database(&self) -> bool {
        self.refresh_tokens == StorageBackend::MySql || self.identities == StorageBackend::MySql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!("MySQL".parse::<StorageBackend>().unwrap(), StorageBackend::MySql);
        assert_eq!("mem".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("postgres".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_needs_database() {
        assert!(!StorageConfig::in_memory().needs_database());
        assert!(StorageConfig::persistent().needs_database());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&StorageBackend::MySql).unwrap();
        assert_eq!(json, "\"mysql\"");
    }
}
