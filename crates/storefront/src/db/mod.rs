//! Catalog store backed by `SQLite`.
//!
//! ## Tables
//!
//! - `branches` - Physical store locations (seed data only)
//! - `products` - Catalog products, appended by the seller path
//! - `customers` - Registrations
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and embedded in
//! the binary. They run on every startup (an in-memory database starts
//! empty) and can be applied to a file database with:
//! ```bash
//! cargo run -p bazaar-cli -- migrate
//! ```

pub mod catalog;
pub mod customers;
pub mod seed;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use catalog::CatalogRepository;
pub use customers::CustomerRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Errors that can occur while opening the catalog at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("failed to seed catalog: {0}")]
    Seed(#[from] RepositoryError),
}

/// Open the database, apply migrations and optionally seed the demo catalog.
///
/// # Errors
///
/// Returns `StartupError` naming the step that failed.
pub async fn open_catalog(
    database_url: &secrecy::SecretString,
    seed: bool,
) -> Result<SqlitePool, StartupError> {
    let pool = create_pool(database_url).await?;
    migrate(&pool).await?;
    if seed {
        seed::seed_catalog(&pool).await?;
    }
    Ok(pool)
}

/// Create a `SQLite` connection pool.
///
/// An in-memory database exists per connection, so it gets exactly one
/// connection that is never closed for idleness or age; otherwise the
/// catalog would vanish between requests.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let url = database_url.expose_secret();
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool_options = if is_in_memory(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    pool_options
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply the embedded migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history diverges.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
pub(crate) mod test_support {
    use secrecy::SecretString;
    use sqlx::SqlitePool;

    /// Fresh migrated in-memory database, optionally seeded.
    #[allow(clippy::unwrap_used)]
    pub async fn pool(seeded: bool) -> SqlitePool {
        let url = SecretString::from(crate::config::DEFAULT_DATABASE_URL);
        super::open_catalog(&url, seeded).await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_memory() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://catalog?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://data/catalog.db"));
    }
}
