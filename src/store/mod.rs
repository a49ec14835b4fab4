use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// User record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Issued bearer token, bound to exactly one user.
///
/// `expires_in` is the advisory lifetime in seconds reported to the client
/// at issuance; resolution does not check it.
#[derive(Debug, Clone, FromRow)]
pub struct AccessToken {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub expires_in: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email is already registered")]
    DuplicateEmail,
    #[error("token value already exists")]
    DuplicateToken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Narrow persistence interface for users and access tokens.
///
/// Uniqueness (email, token value) is enforced atomically by the
/// implementation, not by callers.
#[async_trait]
pub trait AuthStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError>;

    async fn insert_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_in: i64,
    ) -> Result<AccessToken, StoreError>;

    async fn find_user_by_token(&self, token: &str) -> anyhow::Result<Option<User>>;

    /// Delete-by-value. Deleting a token that does not exist is a no-op.
    async fn delete_token(&self, token: &str) -> anyhow::Result<()>;
}
