//! Token service module
//!
//! This module handles the token lifecycle:
//! - Signing and verifying access tokens (HMAC JWT)
//! - Issuing access/refresh pairs
//! - Single-use refresh token rotation
//! - Idempotent refresh token revocation
//! - Access token introspection into a user descriptor

mod config;
mod introspector;
mod issuer;
mod refresher;
mod revoker;
mod service;
mod signer;
mod traits;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use introspector::JwtTokenIntrospector;
pub use issuer::JwtTokenIssuer;
pub use refresher::JwtTokenRefresher;
pub use revoker::JwtTokenRevoker;
pub use service::{TokenService, TokenServiceBuilder};
pub use signer::TokenSigner;
pub use traits::{TokenIntrospector, TokenIssuer, TokenRefresher, TokenRevoker};
