//! In-memory user repository for tests.
//!
//! Mirrors the SeaORM store's semantics, including the unique email index.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{User, UserChanges, ENTITY_USER, FIELD_EMAIL};

use super::UserRepository;

/// Vec-backed user store preserving insertion order
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Number of stored users with this exact email
    pub async fn count_with_email(&self, email: &str) -> usize {
        self.users
            .read()
            .await
            .iter()
            .filter(|u| u.email == email)
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, name: String, email: String, password_hash: String) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::conflict(FIELD_EMAIL));
        }

        let user = User::new(Uuid::new_v4(), name, email, password_hash);
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let mut users = self.users.write().await;

        if let Some(email) = changes.email.as_deref() {
            if users.iter().any(|u| u.id != id && u.email == email) {
                return Err(AppError::conflict(FIELD_EMAIL));
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_not_found(ENTITY_USER)?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);

        if users.len() == before {
            return Err(AppError::not_found(ENTITY_USER));
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }
}
