use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::repo_types::{NewUser, User};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("user already exists")]
    AlreadyExists,
    #[error("user not found")]
    NotFound,
}

/// User persistence. Every read hands back an owned snapshot.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; fails if the email is already taken.
    async fn create(&self, new: NewUser) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    async fn find_by_id(&self, id: Uuid) -> Option<User>;
    /// Replace the whole preference list of a user.
    async fn update_preferences(&self, id: Uuid, preferences: Vec<String>)
        -> Result<User, StoreError>;
}

#[derive(Default)]
struct Inner {
    by_email: HashMap<String, User>,
    email_by_id: HashMap<Uuid, String>,
}

/// Process-lifetime store keyed by email with an id index, behind one lock.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_email.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.by_email.contains_key(&new.email) {
            return Err(StoreError::AlreadyExists);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            preferences: new.preferences,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.email_by_id.insert(user.id, user.email.clone());
        inner.by_email.insert(user.email.clone(), user.clone());
        debug!(user_id = %user.id, "user stored");
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.inner.read().await.by_email.get(email).cloned()
    }

    async fn find_by_id(&self, id: Uuid) -> Option<User> {
        let inner = self.inner.read().await;
        inner
            .email_by_id
            .get(&id)
            .and_then(|email| inner.by_email.get(email))
            .cloned()
    }

    async fn update_preferences(
        &self,
        id: Uuid,
        preferences: Vec<String>,
    ) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        let email = inner
            .email_by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        let user = inner.by_email.get_mut(&email).ok_or(StoreError::NotFound)?;
        user.preferences = preferences;
        Ok(user.clone())
    }
}
