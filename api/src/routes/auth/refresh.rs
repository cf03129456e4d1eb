use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{RefreshTokenRequest, TokenResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new pair. The presented token is consumed
/// and cannot be used again.
///
/// ## Errors
/// - 401 Unauthorized: `TOKEN_INVALID`, `TOKEN_EXPIRED` or `TOKEN_REVOKED`
/// - 500 Internal Server Error: store failure
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.token_service.refresh_tokens(&request.refresh_token).await {
        Ok(tokens) => HttpResponse::Ok().json(TokenResponse::from(tokens)),
        Err(error) => handle_domain_error(error),
    }
}
