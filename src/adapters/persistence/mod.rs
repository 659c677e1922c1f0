pub mod db;
pub mod entity;
pub mod memory;
pub mod postgres;

pub use entity::UserEntity;
pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
