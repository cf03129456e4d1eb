//! Domain error taxonomy.

mod types;

pub use types::TokenError;

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed input, e.g. a subject that is not a UUID or a duplicate token value
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Store-level miss; never crosses the token-service boundary as-is
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Backend failure: store, cache or identity lookup unreachable or inconsistent
    #[error("Repository error: {message}")]
    Repository { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound { resource: resource.into() }
    }

    pub fn repository(message: impl Into<String>) -> Self {
        DomainError::Repository { message: message.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }

    /// The token error carried by this error, if any
    pub fn token_error(&self) -> Option<TokenError> {
        match self {
            DomainError::Token(e) => Some(*e),
            _ => None,
        }
    }

    /// Translate a store miss into `InvalidToken`; other errors pass through
    pub(crate) fn not_found_as_invalid_token(self) -> Self {
        match self {
            DomainError::NotFound { .. } => DomainError::Token(TokenError::InvalidToken),
            other => other,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_becomes_invalid_token() {
        let err = DomainError::not_found("refresh token").not_found_as_invalid_token();
        assert_eq!(err.token_error(), Some(TokenError::InvalidToken));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = DomainError::repository("down").not_found_as_invalid_token();
        assert!(matches!(err, DomainError::Repository { .. }));
        assert_eq!(err.token_error(), None);
    }

    #[test]
    fn test_token_error_display() {
        let err: DomainError = TokenError::TokenExpired.into();
        assert_eq!(err.to_string(), "Token expired");
    }
}
