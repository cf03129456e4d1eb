//! Shared configuration and transport types for Tokenkeep
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types (server, database, cache, JWT, storage, logging)
//! - The error body returned by the transport layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, DatabaseConfig, Environment, JwtConfig,
    LogFormat, LoggingConfig, ServerConfig, StorageBackend, StorageConfig,
};
pub use errors::{error_codes, ErrorResponse};
