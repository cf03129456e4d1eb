//! Read-only identity projection resolved from an access token subject.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal view of a user, produced by an identity resolver and cached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDescriptor {
    pub user_id: Uuid,
    pub username: String,
}

impl UserDescriptor {
    pub fn new(user_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}
