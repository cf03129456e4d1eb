//! Listener settings for the token HTTP API

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::env_or;

/// Where and how `tk_api` listens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// actix worker count; 0 leaves the choice to actix (one per core)
    #[serde(default)]
    pub workers: usize,

    /// Keep-alive in seconds
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u64,

    /// JSON body limit in bytes; token requests carry a single id or token
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 8080)
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            workers: 0,
            keep_alive: default_keep_alive(),
            max_payload_size: default_max_payload_size(),
        }
    }

    /// Override `base` from `SERVER_HOST`, `SERVER_PORT` and `SERVER_WORKERS`
    pub fn from_env(base: Self) -> Self {
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(base.host),
            port: env_or("SERVER_PORT", base.port),
            workers: env_or("SERVER_WORKERS", base.workers),
            ..base
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn keep_alive_duration(&self) -> Duration {
        Duration::from_secs(self.keep_alive)
    }
}

fn default_keep_alive() -> u64 {
    30
}

fn default_max_payload_size() -> usize {
    16 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("0.0.0.0", 9000);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.workers, 0);
        assert_eq!(config.keep_alive_duration(), Duration::from_secs(30));
    }

    #[test]
    fn test_payload_limit_survives_env_overlay() {
        let base = ServerConfig::new("10.0.0.1", 8443);
        let config = ServerConfig::from_env(base);
        // no variable feeds the payload limit
        assert_eq!(config.max_payload_size, 16 * 1024);
    }
}
