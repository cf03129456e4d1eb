use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{IntrospectRequest, IntrospectResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/introspect
///
/// Verifies an access token and returns the descriptor of its subject.
///
/// ## Errors
/// - 401 Unauthorized: `TOKEN_INVALID` or `TOKEN_EXPIRED`
/// - 500 Internal Server Error: the subject no longer resolves, or a lookup failed
pub async fn introspect(
    state: web::Data<AppState>,
    request: web::Json<IntrospectRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.token_service.introspect_token(&request.access_token).await {
        Ok(descriptor) => HttpResponse::Ok().json(IntrospectResponse::from(descriptor)),
        Err(error) => handle_domain_error(error),
    }
}
