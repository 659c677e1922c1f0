//! Postgres implementation of [`UserRepository`].
//!
//! All SQL is runtime-checked (`sqlx::query_as`, not `sqlx::query!`) so the
//! crate builds without a live database.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::entity::UserEntity;
use crate::domain::model::User;
use crate::domain::ports::UserRepository;
use crate::utils::error::{Result, SyncLearnError};

const SELECT_USERS: &str = r#"
    SELECT
        id, email, password, nickname,
        provider, role, status, created_at
    FROM users
"#;

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Wraps an already-migrated pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for health checks.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: &User) -> Result<User> {
        let entity = UserEntity::from_domain(user)?;

        // created_at is left out of the update set: it is written once.
        let saved = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, email, password, nickname, provider, role, status, created_at)
            VALUES (COALESCE($1, gen_random_uuid()), $2, $3, $4, $5, $6, $7, COALESCE($8, now()))
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                password = EXCLUDED.password,
                nickname = EXCLUDED.nickname,
                provider = EXCLUDED.provider,
                role = EXCLUDED.role,
                status = EXCLUDED.status
            RETURNING id, email, password, nickname, provider, role, status, created_at
            "#,
        )
        .bind(entity.id)
        .bind(&entity.email)
        .bind(&entity.password)
        .bind(&entity.nickname)
        .bind(&entity.provider)
        .bind(&entity.role)
        .bind(&entity.status)
        .bind(entity.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if SyncLearnError::is_unique_violation(&e) {
                SyncLearnError::DuplicateEmail {
                    email: entity.email.clone(),
                }
            } else {
                SyncLearnError::Database(e)
            }
        })?;

        tracing::debug!(id = ?saved.id, email = %saved.email, "saved user");
        saved.to_domain()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = format!("{} WHERE id = $1", SELECT_USERS);
        let row = sqlx::query_as::<_, UserEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserEntity::to_domain).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("{} WHERE email = $1", SELECT_USERS);
        let row = sqlx::query_as::<_, UserEntity>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserEntity::to_domain).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let query = format!("{} ORDER BY created_at, id", SELECT_USERS);
        let rows = sqlx::query_as::<_, UserEntity>(&query)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserEntity::to_domain).collect()
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}
