//! Token-related errors
//!
//! The variants are deliberately coarse: callers learn whether to re-login,
//! not why a signature or lookup failed.

use thiserror::Error;

/// Token validation and lifecycle failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed or missing claims, issuer mismatch, or an
    /// unknown refresh token value
    #[error("Invalid token")]
    InvalidToken,

    /// Signature and claims are valid but the token is past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// Valid and unexpired but explicitly revoked
    #[error("Token revoked")]
    TokenRevoked,
}
