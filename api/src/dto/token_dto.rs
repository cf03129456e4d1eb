use serde::{Deserialize, Serialize};
use validator::Validate;

use tk_core::{AuthTokens, UserDescriptor};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueTokensRequest {
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(max = 4096))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RevokeTokenRequest {
    #[validate(length(max = 4096))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IntrospectRequest {
    #[validate(length(max = 4096))]
    pub access_token: String,
}

/// Body returned by issue and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl From<AuthTokens> for TokenResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            user_id: tokens.user_id.to_string(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: "Bearer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectResponse {
    pub user_id: String,
    pub username: String,
}

impl From<UserDescriptor> for IntrospectResponse {
    fn from(descriptor: UserDescriptor) -> Self {
        Self {
            user_id: descriptor.user_id.to_string(),
            username: descriptor.username,
        }
    }
}
