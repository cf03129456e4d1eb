use chrono::{Duration, Utc};
use std::sync::Arc;
use tk_core::domain::entities::{Token, TokenType};
use tk_core::errors::DomainError;
use tk_core::repositories::{IdentityResolver, RefreshTokenStore};
use tk_shared::config::DatabaseConfig;
use uuid::Uuid;

use super::connection_tests::database_url;
use crate::database::{DatabasePool, MySqlIdentityResolver, MySqlRefreshTokenStore};

fn refresh_token(value: &str) -> Token {
    let now = Utc::now();
    Token::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        value.to_string(),
        TokenType::Refresh,
        now,
        now + Duration::days(7),
    )
    .unwrap()
}

async fn migrated_pool() -> DatabasePool {
    let pool = DatabasePool::new(DatabaseConfig::new(database_url()))
        .await
        .unwrap();
    pool.run_migrations().await.unwrap();
    pool
}

#[test]
fn test_token_hash_is_sha256_hex() {
    assert_eq!(
        MySqlRefreshTokenStore::hash_token("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_token_hash_hides_value() {
    let value = "0f3a9c";
    let hash = MySqlRefreshTokenStore::hash_token(value);

    assert_ne!(hash, MySqlRefreshTokenStore::hash_token("0f3a9d"));
    assert!(!hash.contains(value));
    assert_eq!(hash.len(), 64);
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_add_get_and_revoke_once() {
    let pool = migrated_pool().await;
    let store = MySqlRefreshTokenStore::new(pool.get_pool().clone());
    let value = format!("refresh-{}", Uuid::new_v4());
    let token = refresh_token(&value);

    store.add(token.clone()).await.unwrap();

    let stored = store.get(&value).await.unwrap();
    assert_eq!(stored.token_id, token.token_id);
    assert_eq!(stored.value, value);
    assert!(!stored.revoked);

    assert!(store.try_revoke(&value).await.unwrap());
    assert!(!store.try_revoke(&value).await.unwrap());
    assert!(store.get(&value).await.unwrap().revoked);
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_duplicate_value_is_rejected() {
    let pool = migrated_pool().await;
    let store = MySqlRefreshTokenStore::new(pool.get_pool().clone());
    let value = format!("refresh-{}", Uuid::new_v4());

    store.add(refresh_token(&value)).await.unwrap();
    let result = store.add(refresh_token(&value)).await;

    assert!(matches!(result, Err(DomainError::Repository { .. })));
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_unknown_value_is_not_found() {
    let pool = migrated_pool().await;
    let store = MySqlRefreshTokenStore::new(pool.get_pool().clone());

    let result = store.get("never-issued").await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires actual database
async fn test_concurrent_revoke_has_single_winner() {
    let pool = migrated_pool().await;
    let store = Arc::new(MySqlRefreshTokenStore::new(pool.get_pool().clone()));
    let value = format!("refresh-{}", Uuid::new_v4());
    store.add(refresh_token(&value)).await.unwrap();

    let handles = (0..8)
        .map(|_| {
            let store = store.clone();
            let value = value.clone();
            tokio::spawn(async move { store.try_revoke(&value).await.unwrap() })
        })
        .collect::<Vec<_>>();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_identity_lookup() {
    let pool = migrated_pool().await;
    let user_id = Uuid::new_v4();
    let username = format!("user-{}", user_id);
    sqlx::query("INSERT INTO users (id, username) VALUES (?, ?)")
        .bind(user_id.to_string())
        .bind(&username)
        .execute(pool.get_pool())
        .await
        .unwrap();
    let resolver = MySqlIdentityResolver::new(pool.get_pool().clone());

    let descriptor = resolver.get_descriptor(user_id).await.unwrap();
    assert_eq!(descriptor.username, username);

    let missing = resolver.get_descriptor(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}
