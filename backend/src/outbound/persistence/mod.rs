//! PostgreSQL persistence adapters.

pub mod diesel_contact_repository;
pub mod diesel_user_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
