use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{IssueTokensRequest, TokenResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/tokens
///
/// # Request Body
///
/// ```json
/// { "user_id": "5b0b7f0e-8c6d-4bd1-9a0e-2f1f3c1a9d11" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "user_id": "5b0b7f0e-8c6d-4bd1-9a0e-2f1f3c1a9d11",
///     "access_token": "eyJ...",
///     "refresh_token": "9f2c...",
///     "token_type": "Bearer"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `user_id` is not a UUID
/// - 500 Internal Server Error: the refresh token could not be stored
pub async fn issue_tokens(
    state: web::Data<AppState>,
    request: web::Json<IssueTokensRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.token_service.issue_tokens(&request.user_id).await {
        Ok(tokens) => HttpResponse::Ok().json(TokenResponse::from(tokens)),
        Err(error) => handle_domain_error(error),
    }
}
