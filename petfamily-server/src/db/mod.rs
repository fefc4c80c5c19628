//! Database layer: pool, schema, repositories

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repo;
pub mod status;

pub use error::DbError;
pub use pool::{create_lazy_pool, create_pool, create_pool_with_settings, PoolSettings};
pub use repo::ResourceRepo;
pub use status::StatusRepo;
