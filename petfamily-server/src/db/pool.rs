//! Database connection pool management
//!
//! Connections are checked out per operation and returned when the guard
//! (pooled connection or transaction) drops, on success and error paths
//! alike.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Default wait for a free connection before giving up.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// Default time an idle connection is kept.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool sizing and timeouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl PoolSettings {
    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(Some(self.idle_timeout))
    }
}

/// Create a PostgreSQL connection pool with default settings.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/petfamily").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_settings(database_url, &PoolSettings::default()).await
}

/// Create a PostgreSQL connection pool with custom settings.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `settings` - Pool size and timeouts
pub async fn create_pool_with_settings(
    database_url: &str,
    settings: &PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    settings.options().connect(database_url).await
}

/// Create a pool that opens connections on first use.
///
/// Used where the server must start before the database is reachable.
pub fn create_lazy_pool(database_url: &str, settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    settings.options().connect_lazy(database_url)
}
