use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::entity::UserEntity;
use crate::domain::model::User;
use crate::domain::ports::UserRepository;
use crate::utils::error::{Result, SyncLearnError};

/// Process-local [`UserRepository`]. Same contract as the Postgres adapter.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<User> {
        // Same column limits as the users table.
        UserEntity::from_domain(user)?;

        // Held across the uniqueness check and the insert.
        let mut users = self.users.write().await;

        let id = user.id().unwrap_or_else(Uuid::new_v4);

        let taken = users
            .values()
            .any(|other| other.email() == user.email() && other.id() != Some(id));
        if taken {
            return Err(SyncLearnError::DuplicateEmail {
                email: user.email().to_string(),
            });
        }

        let created_at = users
            .get(&id)
            .and_then(User::created_at)
            .or(user.created_at())
            .unwrap_or_else(Utc::now);

        let stored = user.clone().with_id(id).with_created_at(created_at);
        users.insert(id, stored.clone());

        tracing::debug!(%id, email = %stored.email(), "saved user in memory");
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email() == email))
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let mut all: Vec<User> = self.users.read().await.values().cloned().collect();
        all.sort_by_key(|u| (u.created_at(), u.id()));
        Ok(all)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}
