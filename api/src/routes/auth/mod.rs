//! Token lifecycle endpoints under `/api/v1/auth`
//!
//! - `POST /tokens` issue a pair for a user id
//! - `POST /refresh` rotate a refresh token
//! - `POST /revoke` revoke a refresh token
//! - `POST /introspect` resolve an access token to its user

pub mod introspect;
pub mod issue;
pub mod refresh;
pub mod revoke;

pub use introspect::introspect;
pub use issue::issue_tokens;
pub use refresh::refresh;
pub use revoke::revoke;

use std::sync::Arc;

use tk_core::TokenService;
use tk_infra::Infrastructure;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub token_service: TokenService,
    /// Connected backends, checked by `/health`
    pub infrastructure: Arc<Infrastructure>,
}

impl AppState {
    pub fn new(token_service: TokenService, infrastructure: Arc<Infrastructure>) -> Self {
        Self {
            token_service,
            infrastructure,
        }
    }
}
