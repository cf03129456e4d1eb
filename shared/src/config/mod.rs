//! Configuration module with sub-modules per concern
//!
//! - `auth` - JWT signing and token lifetime configuration
//! - `cache` - Redis connection and descriptor cache configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `storage` - Backend selection for stores, resolvers and caches

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

/// Error raised while assembling layered configuration
pub type ConfigError = ::config::ConfigError;

/// Prefix for environment overrides applied by [`AppConfig::load`]
pub const ENV_OVERRIDE_PREFIX: &str = "TOKENKEEP";

/// Parse `var`, falling back when it is unset or malformed
pub(crate) fn env_or<T: std::str::FromStr>(var: &str, fallback: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Backend selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    ///
    /// Everything runs in memory so the service starts without MySQL or Redis.
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: DatabaseConfig::new("mysql://localhost:3306/tokenkeep_dev"),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            storage: StorageConfig::in_memory(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: DatabaseConfig::new("mysql://prod-db:3306/tokenkeep")
                .with_max_connections(50),
            auth: AuthConfig {
                jwt: JwtConfig::new("use-env-variable"),
            },
            cache: CacheConfig::new("redis://prod-cache:6379").with_prefix("tokenkeep"),
            storage: StorageConfig::persistent(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Starts from the preset for the detected environment and overrides
    /// individual sections from their variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        if std::env::var("DATABASE_URL").is_ok() {
            config.database = DatabaseConfig::from_env();
        }
        if std::env::var("REDIS_URL").is_ok() {
            config.cache = CacheConfig::from_env();
        }
        if std::env::var("JWT_SECRET").is_ok() {
            config.auth = AuthConfig::from_env();
        }
        config.server = ServerConfig::from_env(config.server);
        config.storage = StorageConfig::from_env(config.storage);
        config.logging = config.logging.with_env_overrides();

        config
    }

    /// Load layered configuration
    ///
    /// Layers, lowest precedence first: [`AppConfig::from_env`], the optional
    /// `config.<environment>.toml` file, then `TOKENKEEP__SECTION__FIELD`
    /// environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::from_env();
        let file = defaults.environment.config_file();

        ::config::Config::builder()
            .add_source(::config::Config::try_from(&defaults)?)
            .add_source(
                ::config::File::new(&file, ::config::FileFormat::Toml).required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_OVERRIDE_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
