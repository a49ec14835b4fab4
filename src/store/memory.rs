use super::{AccessToken, AuthStore, StoreError, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

/// In-process store with the same uniqueness guarantees as Postgres.
/// Backs `AppState::fake()` and the unit tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    tokens: HashMap<String, AccessToken>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }

    #[cfg(test)]
    pub fn token_count(&self) -> usize {
        self.inner.lock().unwrap().tokens.len()
    }
}

#[async_trait]
impl AuthStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        // Uniqueness is checked and the row inserted under one lock, so two
        // concurrent registrations cannot both pass the check.
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn insert_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_in: i64,
    ) -> Result<AccessToken, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.tokens.contains_key(token) {
            return Err(StoreError::DuplicateToken);
        }
        let record = AccessToken {
            token: token.to_owned(),
            user_id,
            created_at: OffsetDateTime::now_utc(),
            expires_in,
        };
        inner.tokens.insert(token.to_owned(), record.clone());
        Ok(record)
    }

    async fn find_user_by_token(&self, token: &str) -> anyhow::Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        match inner.tokens.get(token) {
            Some(record) => Ok(inner.users.iter().find(|u| u.id == record.user_id).cloned()),
            None => Ok(None),
        }
    }

    async fn delete_token(&self, token: &str) -> anyhow::Result<()> {
        self.inner.lock().unwrap().tokens.remove(token);
        Ok(())
    }
}
