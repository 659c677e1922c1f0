use clap::{Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::domain::model::{AuthProvider, UserRole, UserStatus};

#[derive(Debug, Parser)]
#[command(name = "synclearn")]
#[command(about = "Operate the SyncLearn user store")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "SYNCLEARN_CONFIG")]
    pub config: Option<String>,

    /// Overrides database.url from the config file
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply pending schema migrations
    Migrate,
    /// Check connectivity and that the users table exists
    Check,
    /// Manage users
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a new user
    Add(AddUserArgs),
    /// Look up a user by email or id
    Get(LookupArgs),
    /// List all users, oldest first
    List,
    /// Change a user's account status
    Status {
        #[arg(long)]
        id: Uuid,
        #[arg(long, value_enum, ignore_case = true)]
        status: StatusArg,
    },
    /// Delete a user
    Remove {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Debug, Args)]
pub struct AddUserArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub nickname: String,

    /// Omit for social sign-ups
    #[arg(long)]
    pub password: Option<String>,

    #[arg(long, value_enum, ignore_case = true, default_value = "local")]
    pub provider: ProviderArg,

    #[arg(long, value_enum, ignore_case = true, default_value = "user")]
    pub role: RoleArg,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct LookupArgs {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ProviderArg {
    Local,
    Github,
}

impl From<ProviderArg> for AuthProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Local => AuthProvider::Local,
            ProviderArg::Github => AuthProvider::Github,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum RoleArg {
    User,
    Manager,
    Admin,
}

impl From<RoleArg> for UserRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::User => UserRole::User,
            RoleArg::Manager => UserRole::Manager,
            RoleArg::Admin => UserRole::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum StatusArg {
    Active,
    Inactive,
    Deleted,
}

impl From<StatusArg> for UserStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => UserStatus::Active,
            StatusArg::Inactive => UserStatus::Inactive,
            StatusArg::Deleted => UserStatus::Deleted,
        }
    }
}

impl CliConfig {
    /// File config (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> crate::Result<AppConfig> {
        let mut config = AppConfig::load_or_default(self.config.as_deref())?;
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_add() {
        let cli = CliConfig::try_parse_from([
            "synclearn",
            "--database-url",
            "postgres://localhost/synclearn",
            "user",
            "add",
            "--email",
            "alice@example.com",
            "--nickname",
            "alice",
            "--provider",
            "github",
        ])
        .unwrap();

        match cli.command {
            Command::User(UserCommand::Add(args)) => {
                assert_eq!(args.email, "alice@example.com");
                assert!(args.password.is_none());
                assert_eq!(AuthProvider::from(args.provider), AuthProvider::Github);
                assert_eq!(UserRole::from(args.role), UserRole::User);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_get_requires_exactly_one_key() {
        assert!(CliConfig::try_parse_from(["synclearn", "user", "get"]).is_err());
        assert!(CliConfig::try_parse_from([
            "synclearn",
            "user",
            "get",
            "--email",
            "a@example.com",
            "--id",
            "123e4567-e89b-12d3-a456-426614174000",
        ])
        .is_err());
    }

    #[test]
    fn test_database_url_flag_overrides_file() {
        let cli = CliConfig::try_parse_from([
            "synclearn",
            "--database-url",
            "postgres://override/db",
            "check",
        ])
        .unwrap();

        let config = cli.resolve().unwrap();
        assert_eq!(config.database.url, "postgres://override/db");
    }

    #[test]
    fn test_status_values_ignore_case() {
        let cli = CliConfig::try_parse_from([
            "synclearn",
            "user",
            "status",
            "--id",
            "123e4567-e89b-12d3-a456-426614174000",
            "--status",
            "INACTIVE",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::User(UserCommand::Status {
                status: StatusArg::Inactive,
                ..
            })
        ));
    }
}
