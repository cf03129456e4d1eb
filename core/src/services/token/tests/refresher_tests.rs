//! Unit tests for refresh token rotation

use std::sync::Arc;

use chrono::Duration;

use crate::errors::{DomainError, TokenError};
use crate::repositories::RefreshTokenStore;
use crate::services::clock::ManualClock;
use crate::services::token::{JwtTokenRefresher, TokenIssuer, TokenRefresher};

use super::mocks::{start_time, FailingStore, Fixture};

fn token_error<T: std::fmt::Debug>(result: Result<T, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected a token error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_refresh_rotates_pair() {
    let fixture = Fixture::new();
    let original = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();
    fixture.clock.advance(Duration::seconds(30));

    let rotated = fixture.service.refresh_tokens(&original.refresh_token).await.unwrap();

    assert_eq!(rotated.user_id, fixture.user_id);
    assert_ne!(rotated.access_token, original.access_token);
    assert_ne!(rotated.refresh_token, original.refresh_token);
    assert!(fixture.store.get(&original.refresh_token).await.unwrap().is_revoked());
    assert!(!fixture.store.get(&rotated.refresh_token).await.unwrap().is_revoked());
}

#[tokio::test]
async fn test_refresh_token_is_single_use() {
    let fixture = Fixture::new();
    let original = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();

    fixture.service.refresh_tokens(&original.refresh_token).await.unwrap();
    let second = fixture.service.refresh_tokens(&original.refresh_token).await;

    assert_eq!(token_error(second), TokenError::TokenRevoked);
}

#[tokio::test]
async fn test_rotated_token_can_refresh_again() {
    let fixture = Fixture::new();
    let first = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();

    let second = fixture.service.refresh_tokens(&first.refresh_token).await.unwrap();
    let third = fixture.service.refresh_tokens(&second.refresh_token).await.unwrap();

    assert_eq!(third.user_id, fixture.user_id);
    assert_eq!(fixture.store.len().await, 3);
}

#[tokio::test]
async fn test_unknown_refresh_token_is_invalid() {
    let fixture = Fixture::new();

    let result = fixture.service.refresh_tokens("never-issued").await;

    assert_eq!(token_error(result), TokenError::InvalidToken);
}

#[tokio::test]
async fn test_expired_refresh_token_is_left_untouched() {
    let fixture = Fixture::new();
    let tokens = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();

    fixture.clock.advance(Duration::days(8));
    let result = fixture.service.refresh_tokens(&tokens.refresh_token).await;

    assert_eq!(token_error(result), TokenError::TokenExpired);
    assert!(!fixture.store.get(&tokens.refresh_token).await.unwrap().is_revoked());
    assert_eq!(fixture.store.len().await, 1);
}

#[tokio::test]
async fn test_refresh_token_expires_at_its_expiry_instant() {
    let fixture = Fixture::new();
    let tokens = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();

    fixture.clock.set(start_time() + Duration::days(7));
    let result = fixture.service.refresh_tokens(&tokens.refresh_token).await;

    assert_eq!(token_error(result), TokenError::TokenExpired);
}

#[tokio::test]
async fn test_expiry_takes_precedence_over_revocation() {
    let fixture = Fixture::new();
    let tokens = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();
    fixture.store.try_revoke(&tokens.refresh_token).await.unwrap();

    fixture.clock.advance(Duration::days(8));
    let result = fixture.service.refresh_tokens(&tokens.refresh_token).await;

    assert_eq!(token_error(result), TokenError::TokenExpired);
}

#[tokio::test]
async fn test_revoked_refresh_token() {
    let fixture = Fixture::new();
    let tokens = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();

    fixture.service.revoke_token(&tokens.refresh_token).await.unwrap();
    let result = fixture.service.refresh_tokens(&tokens.refresh_token).await;

    assert_eq!(token_error(result), TokenError::TokenRevoked);
}

#[tokio::test]
async fn test_store_failure_is_not_reported_as_invalid_token() {
    struct NeverIssues;

    #[async_trait::async_trait]
    impl TokenIssuer for NeverIssues {
        async fn issue_tokens(
            &self,
            _user_id: uuid::Uuid,
        ) -> crate::errors::DomainResult<crate::domain::entities::TokenPair> {
            panic!("issuer must not be reached");
        }
    }

    let refresher = JwtTokenRefresher::new(
        Arc::new(FailingStore),
        Arc::new(NeverIssues),
        Arc::new(ManualClock::new(start_time())),
    );

    let result = refresher.refresh_tokens("anything").await;

    assert!(matches!(result, Err(DomainError::Repository { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_refresh_mints_exactly_one_pair() {
    let fixture = Fixture::new();
    let tokens = fixture.service.issue_tokens_for(fixture.user_id).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let service = fixture.service.clone();
        let value = tokens.refresh_token.clone();
        handles.push(tokio::spawn(async move { service.refresh_tokens(&value).await }));
    }

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(e) => assert_eq!(e.token_error(), Some(TokenError::TokenRevoked)),
        }
    }

    assert_eq!(succeeded, 1);
    // The original plus exactly one rotated token
    assert_eq!(fixture.store.len().await, 2);
}
