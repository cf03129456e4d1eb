//! Unit tests for token entities

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{Token, TokenPair, TokenType};
use crate::errors::DomainError;

fn refresh_token(lifetime: Duration) -> Token {
    let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    Token::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "a1b2c3".to_string(),
        TokenType::Refresh,
        issued_at,
        issued_at + lifetime,
    )
    .unwrap()
}

#[test]
fn test_token_creation() {
    let token = refresh_token(Duration::days(7));

    assert_eq!(token.token_type, TokenType::Refresh);
    assert!(!token.is_revoked());
    assert!(token.is_usable(token.issued_at));
}

#[test]
fn test_token_rejects_empty_lifetime() {
    let now = Utc::now();
    let result = Token::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "value".to_string(),
        TokenType::Access,
        now,
        now,
    );

    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[test]
fn test_token_expires_at_boundary() {
    let token = refresh_token(Duration::minutes(5));

    assert!(!token.is_expired(token.expires_at - Duration::seconds(1)));
    assert!(token.is_expired(token.expires_at));
    assert!(!token.is_usable(token.expires_at));
}

#[test]
fn test_token_revocation() {
    let mut token = refresh_token(Duration::days(7));

    token.revoke();

    assert!(token.is_revoked());
    assert!(!token.is_usable(token.issued_at));
}

#[test]
fn test_time_until_expiration() {
    let token = refresh_token(Duration::hours(2));

    assert_eq!(
        token.time_until_expiration(token.issued_at + Duration::hours(1)),
        Duration::hours(1)
    );
    assert_eq!(
        token.time_until_expiration(token.expires_at + Duration::hours(1)),
        Duration::zero()
    );
}

#[test]
fn test_debug_redacts_value() {
    let token = refresh_token(Duration::days(1));
    let rendered = format!("{:?}", token);

    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("a1b2c3"));
}

#[test]
fn test_token_pair_accessors() {
    let refresh = refresh_token(Duration::days(7));
    let mut access = refresh.clone();
    access.token_type = TokenType::Access;
    access.value = "signed.jwt.value".to_string();

    let pair = TokenPair::new(access, refresh.clone());

    assert_eq!(pair.user_id(), refresh.user_id);
    assert_eq!(pair.access_token(), "signed.jwt.value");
    assert_eq!(pair.refresh_token(), "a1b2c3");
}
