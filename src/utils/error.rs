use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncLearnError {
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid {kind} value: {value}")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Bad input or a missing record; the caller can fix and retry.
    Low,
    /// Transient infrastructure failure.
    Medium,
    /// Broken configuration or environment.
    Critical,
}

impl SyncLearnError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation { .. }
            | Self::InvalidEnumValue { .. }
            | Self::DuplicateEmail { .. }
            | Self::NotFound { .. } => ErrorSeverity::Low,
            Self::Database(_) | Self::Io(_) => ErrorSeverity::Medium,
            Self::Migration(_)
            | Self::Serialization(_)
            | Self::ConfigValidation { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. } => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidEnumValue { kind, value } => {
                format!("'{}' is not a valid {}", value, kind)
            }
            Self::DuplicateEmail { email } => {
                format!("A user with email {} already exists", email)
            }
            Self::NotFound { what } => format!("{} was not found", what),
            Self::Database(_) => "Could not talk to the database".to_string(),
            Self::Migration(_) => "Database schema migration failed".to_string(),
            Self::Io(e) => format!("File access failed: {}", e),
            Self::Serialization(_) => "Could not encode or decode data".to_string(),
            Self::ConfigValidation { field, .. }
            | Self::InvalidConfigValue { field, .. } => {
                format!("Configuration value '{}' is invalid", field)
            }
            Self::MissingConfig { field } => {
                format!("Configuration value '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Validation { .. } | Self::InvalidEnumValue { .. } => {
                "Check the input values and try again"
            }
            Self::DuplicateEmail { .. } => "Use a different email or look up the existing user",
            Self::NotFound { .. } => "Verify the identifier or email",
            Self::Database(_) => "Check that Postgres is running and DATABASE_URL is correct",
            Self::Migration(_) => "Inspect the _sqlx_migrations table for a failed version",
            Self::Io(_) => "Check file paths and permissions",
            Self::Serialization(_) => "Check the data format",
            Self::ConfigValidation { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. } => "Fix the configuration file or CLI flags",
        }
    }

    /// True when the database rejected a write because of a unique index.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
    }
}

pub type Result<T> = std::result::Result<T, SyncLearnError>;
