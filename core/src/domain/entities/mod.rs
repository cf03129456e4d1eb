//! Domain entities representing tokens and the identities they resolve to.

pub mod descriptor;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use descriptor::UserDescriptor;
pub use token::{Token, TokenClaims, TokenPair, TokenType};
