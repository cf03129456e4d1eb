//! Value objects handed to the transport layer.

pub mod auth_tokens;

// Re-export commonly used types
pub use auth_tokens::AuthTokens;
