use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::model::User;
use crate::utils::error::Result;
use crate::utils::validation::validate_max_chars;

pub const EMAIL_MAX_CHARS: usize = 100;
pub const NICKNAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MAX_CHARS: usize = 255;

/// Row of the `users` table. Enum columns are stored by name.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserEntity {
    pub id: Option<Uuid>,
    pub email: String,
    pub password: Option<String>,
    pub nickname: String,
    pub provider: String,
    pub role: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserEntity {
    /// Copies every field, checking the column length limits.
    pub fn from_domain(user: &User) -> Result<Self> {
        validate_max_chars("email", user.email(), EMAIL_MAX_CHARS)?;
        validate_max_chars("nickname", user.nickname(), NICKNAME_MAX_CHARS)?;
        if let Some(password) = user.password() {
            validate_max_chars("password", password, PASSWORD_MAX_CHARS)?;
        }

        Ok(Self {
            id: user.id(),
            email: user.email().to_string(),
            password: user.password().map(str::to_string),
            nickname: user.nickname().to_string(),
            provider: user.provider().as_str().to_string(),
            role: user.role().as_str().to_string(),
            status: user.status().as_str().to_string(),
            created_at: user.created_at(),
        })
    }

    /// Fails on rows holding unknown enum names or values the domain rejects.
    pub fn to_domain(self) -> Result<User> {
        User::new(
            self.id,
            self.email,
            self.nickname,
            self.password,
            self.provider.parse()?,
            self.role.parse()?,
            self.status.parse()?,
            self.created_at,
        )
    }
}
