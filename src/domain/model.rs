use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::utils::error::{Result, SyncLearnError};
use crate::utils::validation::{is_blank, validate_non_blank};

// ASCII word class on purpose: `\w` in the regex crate is Unicode-aware.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.%+-]+@[A-Za-z0-9_.-]+\.[A-Za-z]{2,}$").unwrap()
});

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// Exact, case-sensitive parse of the stored form.
        impl FromStr for $name {
            type Err = SyncLearnError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(SyncLearnError::InvalidEnumValue {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// How the account was signed up.
    AuthProvider, "auth provider" {
        /// Email and password sign-up
        Local => "LOCAL",
        /// GitHub OAuth
        Github => "GITHUB",
    }
}

string_enum! {
    UserRole, "user role" {
        User => "USER",
        /// Manages a study group
        Manager => "MANAGER",
        /// Service operator
        Admin => "ADMIN",
    }
}

string_enum! {
    UserStatus, "user status" {
        Active => "ACTIVE",
        /// Dormant account
        Inactive => "INACTIVE",
        /// Withdrawn
        Deleted => "DELETED",
    }
}

/// A SyncLearn user, independent of how it is stored.
///
/// Values are validated on construction and immutable afterwards. `id` and
/// `created_at` stay `None` until the user has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserFields")]
pub struct User {
    id: Option<Uuid>,
    email: String,
    nickname: String,
    // Never written out; accepted on input.
    #[serde(skip_serializing)]
    password: Option<String>,
    provider: AuthProvider,
    role: UserRole,
    status: UserStatus,
    created_at: Option<DateTime<Utc>>,
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Option<Uuid>,
        email: impl Into<String>,
        nickname: impl Into<String>,
        password: Option<String>,
        provider: AuthProvider,
        role: UserRole,
        status: UserStatus,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let email = email.into();
        let nickname = nickname.into();

        if !EMAIL_RE.is_match(&email) {
            return Err(SyncLearnError::validation("email", "invalid email format"));
        }
        validate_non_blank("nickname", &nickname, "nickname must not be blank")?;

        Ok(Self {
            id,
            email,
            nickname,
            password,
            provider,
            role,
            status,
            created_at,
        })
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn provider(&self) -> AuthProvider {
        self.provider
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Social sign-ups have no password; blank counts as none.
    pub fn has_password(&self) -> bool {
        self.password
            .as_deref()
            .is_some_and(|p| !is_blank(p))
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }
}

/// Raw shape accepted on the deserialization path, so that a missing or null
/// email reports "email is required" instead of a generic serde error.
#[derive(Debug, Deserialize)]
struct UserFields {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    password: Option<String>,
    provider: AuthProvider,
    role: UserRole,
    status: UserStatus,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserFields> for User {
    type Error = SyncLearnError;

    fn try_from(raw: UserFields) -> Result<Self> {
        let email = raw
            .email
            .ok_or_else(|| SyncLearnError::validation("email", "email is required"))?;
        let nickname = raw
            .nickname
            .ok_or_else(|| SyncLearnError::validation("nickname", "nickname is required"))?;

        User::new(
            raw.id,
            email,
            nickname,
            raw.password,
            raw.provider,
            raw.role,
            raw.status,
            raw.created_at,
        )
    }
}

/// Input for registering a user; id and timestamp are assigned on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub nickname: String,
    pub password: Option<String>,
    pub provider: AuthProvider,
    pub role: UserRole,
}

impl NewUser {
    pub fn into_user(self) -> Result<User> {
        User::new(
            None,
            self.email,
            self.nickname,
            self.password,
            self.provider,
            self.role,
            UserStatus::Active,
            None,
        )
    }
}
