//! Unit tests for refresh token revocation

use chrono::Duration;

use crate::errors::{DomainError, TokenError};
use crate::repositories::RefreshTokenStore;

use super::mocks::Fixture;

#[tokio::test]
async fn test_revoke_marks_token_revoked() {
    let fixture = Fixture::new();
    let tokens = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();

    fixture.service.revoke_token(&tokens.refresh_token).await.unwrap();

    assert!(fixture.store.get(&tokens.refresh_token).await.unwrap().is_revoked());
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let fixture = Fixture::new();
    let tokens = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();

    fixture.service.revoke_token(&tokens.refresh_token).await.unwrap();
    fixture.service.revoke_token(&tokens.refresh_token).await.unwrap();

    assert!(fixture.store.get(&tokens.refresh_token).await.unwrap().is_revoked());
}

#[tokio::test]
async fn test_revoke_expired_token_is_a_no_op() {
    let fixture = Fixture::new();
    let tokens = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();
    fixture.clock.advance(Duration::days(30));

    fixture.service.revoke_token(&tokens.refresh_token).await.unwrap();
    fixture.service.revoke_token(&tokens.refresh_token).await.unwrap();

    assert!(!fixture.store.get(&tokens.refresh_token).await.unwrap().is_revoked());
}

#[tokio::test]
async fn test_revoke_after_rotation_succeeds() {
    let fixture = Fixture::new();
    let tokens = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();
    fixture.service.refresh_tokens(&tokens.refresh_token).await.unwrap();

    assert!(fixture.service.revoke_token(&tokens.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_revoke_unknown_token_is_invalid() {
    let fixture = Fixture::new();

    let result = fixture.service.revoke_token("never-issued").await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[tokio::test]
async fn test_revoke_then_refresh_is_rejected() {
    let fixture = Fixture::new();
    let tokens = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();

    fixture.service.revoke_token(&tokens.refresh_token).await.unwrap();
    let result = fixture.service.refresh_tokens(&tokens.refresh_token).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}
