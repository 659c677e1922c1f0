use crate::domain::model::User;
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence port for [`User`].
///
/// Implementations enforce email uniqueness and own id generation and the
/// `created_at` stamp. `created_at` is written once and never updated.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user without an id, or inserts/updates one that has an id.
    /// Returns the stored value with id and `created_at` filled in.
    async fn save(&self, user: &User) -> Result<User>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    /// Oldest first.
    async fn find_all(&self) -> Result<Vec<User>>;

    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;

    async fn count(&self) -> Result<u64>;
}
