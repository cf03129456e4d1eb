//! Error-to-status dispatch
//!
//! Every [`DomainError`] reaching the transport goes through
//! [`handle_domain_error`]. Token failures become 401 with a code naming the
//! failure kind, malformed input becomes 400, and anything else is a 500
//! whose details stay in the logs.

use actix_web::{error::JsonPayloadError, http::header, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use tk_core::{DomainError, TokenError};
use tk_shared::{error_codes, ErrorResponse};

/// Map a service error to its HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) => {
            tracing::debug!(error = %token_error, "Rejected token");

            let (code, message) = match token_error {
                TokenError::InvalidToken => (error_codes::TOKEN_INVALID, "Token is invalid"),
                TokenError::TokenExpired => (error_codes::TOKEN_EXPIRED, "Token has expired"),
                TokenError::TokenRevoked => (error_codes::TOKEN_REVOKED, "Token has been revoked"),
            };

            HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(ErrorResponse::new(code, message))
        }
        DomainError::Validation { message } => {
            tracing::debug!(%message, "Rejected request");
            HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::INVALID_ARGUMENT, message))
        }
        other @ (DomainError::NotFound { .. }
        | DomainError::Repository { .. }
        | DomainError::Internal { .. }) => {
            tracing::error!(error = %other, "Request failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 400 listing the fields that failed validation
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::INVALID_ARGUMENT, "Request validation failed")
            .add_detail("fields", fields),
    )
}

/// Body extractor failures (bad JSON, missing fields, oversized payloads)
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Malformed request body");

    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::INVALID_ARGUMENT,
        "Malformed request body",
    ));

    actix_web::error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};

    async fn error_code(response: HttpResponse) -> String {
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["error"].as_str().unwrap().to_string()
    }

    #[actix_web::test]
    async fn test_token_errors_are_unauthorized() {
        let cases = [
            (TokenError::InvalidToken, error_codes::TOKEN_INVALID),
            (TokenError::TokenExpired, error_codes::TOKEN_EXPIRED),
            (TokenError::TokenRevoked, error_codes::TOKEN_REVOKED),
        ];

        for (token_error, code) in cases {
            let response = handle_domain_error(token_error.into());
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
            assert_eq!(error_code(response).await, code);
        }
    }

    #[actix_web::test]
    async fn test_validation_is_bad_request() {
        let response = handle_domain_error(DomainError::Validation {
            message: "user_id is not a valid UUID".to_string(),
        });

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, error_codes::INVALID_ARGUMENT);
    }

    #[actix_web::test]
    async fn test_backend_failures_hide_details() {
        let response = handle_domain_error(DomainError::repository("connection refused to 10.0.0.5"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains(error_codes::INTERNAL_ERROR));
        assert!(!text.contains("10.0.0.5"));
    }

    #[actix_web::test]
    async fn test_raw_not_found_is_internal() {
        let response = handle_domain_error(DomainError::not_found("user"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_duplicate_refresh_value_is_internal() {
        use chrono::{Duration, Utc};
        use tk_core::{InMemoryRefreshTokenStore, RefreshTokenStore, Token, TokenType};
        use uuid::Uuid;

        let store = InMemoryRefreshTokenStore::new();
        let now = Utc::now();
        let token = Token::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "dup".to_string(),
            TokenType::Refresh,
            now,
            now + Duration::days(7),
        )
        .unwrap();
        store.add(token.clone()).await.unwrap();

        let err = store.add(token).await.unwrap_err();
        let response = handle_domain_error(err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_code(response).await, error_codes::INTERNAL_ERROR);
    }
}
