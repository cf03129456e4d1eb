//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - Refresh token store and identity resolver backed by MySQL

pub mod connection;
pub mod mysql;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlIdentityResolver, MySqlRefreshTokenStore};

#[cfg(test)]
mod tests;
