pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::persistence::{InMemoryUserRepository, PgUserRepository, UserEntity};
pub use config::AppConfig;
pub use self::core::UserService;
pub use domain::{AuthProvider, NewUser, User, UserRepository, UserRole, UserStatus};
pub use utils::error::{Result, SyncLearnError};
