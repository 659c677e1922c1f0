use uuid::Uuid;

use crate::domain::model::{NewUser, User, UserStatus};
use crate::domain::ports::UserRepository;
use crate::utils::error::{Result, SyncLearnError};

/// Application service over any [`UserRepository`].
pub struct UserService<R: UserRepository> {
    repository: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        let user = new_user.into_user()?;

        if self.repository.exists_by_email(user.email()).await? {
            tracing::info!(email = %user.email(), "registration rejected, email taken");
            return Err(SyncLearnError::DuplicateEmail {
                email: user.email().to_string(),
            });
        }

        let saved = self.repository.save(&user).await?;
        tracing::info!(
            id = ?saved.id(),
            email = %saved.email(),
            provider = %saved.provider(),
            "registered user"
        );
        Ok(saved)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| SyncLearnError::not_found(format!("user with email {}", email)))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| SyncLearnError::not_found(format!("user {}", id)))
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.repository.find_all().await
    }

    pub async fn change_status(&self, id: Uuid, status: UserStatus) -> Result<User> {
        let user = self.get_by_id(id).await?;
        if user.status() == status {
            return Ok(user);
        }

        let from = user.status();
        let saved = self.repository.save(&user.with_status(status)).await?;
        tracing::info!(%id, %from, to = %status, "changed user status");
        Ok(saved)
    }

    pub async fn remove(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete_by_id(id).await? {
            return Err(SyncLearnError::not_found(format!("user {}", id)));
        }
        tracing::info!(%id, "removed user");
        Ok(())
    }
}
