use super::{AccessToken, AuthStore, StoreError, User};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn unique_violation(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}

#[async_trait]
impl AuthStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if unique_violation(&e) {
                StoreError::DuplicateEmail
            } else {
                StoreError::Other(e.into())
            }
        })?;
        Ok(user)
    }

    async fn insert_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_in: i64,
    ) -> Result<AccessToken, StoreError> {
        let record = sqlx::query_as::<_, AccessToken>(
            r#"
            INSERT INTO access_tokens (token, user_id, expires_in)
            VALUES ($1, $2, $3)
            RETURNING token, user_id, created_at, expires_in
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_in)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if unique_violation(&e) {
                StoreError::DuplicateToken
            } else {
                StoreError::Other(e.into())
            }
        })?;
        Ok(record)
    }

    async fn find_user_by_token(&self, token: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.password_hash, u.created_at, u.updated_at
            FROM users u
            JOIN access_tokens t ON t.user_id = u.id
            WHERE t.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn delete_token(&self, token: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM access_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
