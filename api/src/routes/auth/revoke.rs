use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::RevokeTokenRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/revoke
///
/// Idempotent: revoking an already revoked or expired token succeeds.
/// Only a value that was never issued is rejected (401 `TOKEN_INVALID`).
pub async fn revoke(
    state: web::Data<AppState>,
    request: web::Json<RevokeTokenRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.token_service.revoke_token(&request.refresh_token).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(error),
    }
}
