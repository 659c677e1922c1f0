pub mod user_service;

pub use crate::domain::model::{NewUser, User};
pub use crate::domain::ports::UserRepository;
pub use crate::utils::error::Result;
pub use user_service::UserService;
