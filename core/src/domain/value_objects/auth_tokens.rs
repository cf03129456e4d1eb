//! Transport-neutral result of issuing or refreshing tokens.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::TokenPair;

/// Token strings returned to callers after issuance or rotation
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub user_id: Uuid,

    /// Signed access token
    pub access_token: String,

    /// Opaque single-use refresh token
    pub refresh_token: String,
}

impl From<TokenPair> for AuthTokens {
    fn from(pair: TokenPair) -> Self {
        Self {
            user_id: pair.access.user_id,
            access_token: pair.access.value,
            refresh_token: pair.refresh.value,
        }
    }
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}
