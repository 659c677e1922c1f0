// Domain layer: user model and ports. No database or runtime types here.

pub mod model;
pub mod ports;

pub use model::{AuthProvider, NewUser, User, UserRole, UserStatus};
pub use ports::UserRepository;
