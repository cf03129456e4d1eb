//! MySQL implementation of the RefreshTokenStore trait.
//!
//! Token values are bearer credentials, so only their SHA-256 digest is
//! persisted and used as the lookup key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tk_core::domain::entities::{Token, TokenType};
use tk_core::errors::{DomainError, DomainResult};
use tk_core::repositories::RefreshTokenStore;

/// MySQL implementation of RefreshTokenStore
pub struct MySqlRefreshTokenStore {
    pool: MySqlPool,
}

impl MySqlRefreshTokenStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hex SHA-256 digest of a token value
    pub(crate) fn hash_token(value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Rebuild a token from its row; the row has no plaintext so the
    /// presented `value` is carried back in
    fn row_to_token(row: &sqlx::mysql::MySqlRow, value: &str) -> DomainResult<Token> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::repository(format!("Failed to get id: {}", e)))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::repository(format!("Failed to get user_id: {}", e)))?;

        Ok(Token {
            token_id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            value: value.to_string(),
            token_type: TokenType::Refresh,
            issued_at: row
                .try_get::<DateTime<Utc>, _>("issued_at")
                .map_err(|e| DomainError::repository(format!("Failed to get issued_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::repository(format!("Failed to get expires_at: {}", e)))?,
            revoked: row
                .try_get("revoked")
                .map_err(|e| DomainError::repository(format!("Failed to get revoked: {}", e)))?,
        })
    }
}

fn parse_uuid(raw: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| DomainError::repository(format!("Invalid UUID: {}", e)))
}

#[async_trait]
impl RefreshTokenStore for MySqlRefreshTokenStore {
    async fn get(&self, value: &str) -> DomainResult<Token> {
        let query = r#"
            SELECT id, user_id, issued_at, expires_at, revoked
            FROM refresh_tokens
            WHERE value_hash = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(Self::hash_token(value))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::repository(format!("Database query failed: {}", e)))?;

        match row {
            Some(row) => Self::row_to_token(&row, value),
            None => Err(DomainError::not_found("refresh token")),
        }
    }

    async fn add(&self, token: Token) -> DomainResult<()> {
        if token.token_type != TokenType::Refresh {
            return Err(DomainError::Validation {
                message: format!("Cannot store {} token as a refresh token", token.token_type),
            });
        }

        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, value_hash, issued_at, expires_at, revoked
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.token_id.to_string())
            .bind(token.user_id.to_string())
            .bind(Self::hash_token(&token.value))
            .bind(token.issued_at)
            .bind(token.expires_at)
            .bind(token.revoked)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::repository("Refresh token value already stored")
                }
                e => DomainError::repository(format!("Failed to store refresh token: {}", e)),
            })?;

        tracing::debug!(token_id = %token.token_id, user_id = %token.user_id, "Stored refresh token");
        Ok(())
    }

    async fn try_revoke(&self, value: &str) -> DomainResult<bool> {
        // The `revoked = FALSE` guard makes the flip a single atomic
        // compare-and-set; concurrent callers see exactly one affected row.
        let query = r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE value_hash = ? AND revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Self::hash_token(value))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::repository(format!("Failed to revoke refresh token: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}
