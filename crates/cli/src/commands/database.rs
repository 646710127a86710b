//! Database commands.
//!
//! # Usage
//!
//! ```bash
//! # Apply migrations to the configured database
//! STOREFRONT_DATABASE_URL=sqlite://data/bazaar.db bazaar migrate
//!
//! # Insert the demo catalog if it is empty
//! STOREFRONT_DATABASE_URL=sqlite://data/bazaar.db bazaar seed
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`)

use secrecy::ExposeSecret;
use tracing::{info, warn};

use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::db::{self, seed::SeedOutcome};

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database cannot be
/// opened, or a migration fails.
pub async fn migrate() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    warn_if_in_memory(&config);

    info!("Connecting to storefront database...");
    let pool = db::create_pool(&config.database_url).await?;

    info!("Running storefront migrations...");
    db::migrate(&pool).await?;

    info!("Storefront migrations complete!");
    Ok(())
}

/// Seed the demo branches and products.
///
/// Migrations are applied first so a fresh file database can be seeded in
/// one step.
///
/// # Errors
///
/// Returns an error if configuration is invalid or any database step fails.
pub async fn seed() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    warn_if_in_memory(&config);

    let pool = db::open_catalog(&config.database_url, false).await?;

    match db::seed::seed_catalog(&pool).await? {
        SeedOutcome::AlreadySeeded => info!("Catalog already has products, nothing to do"),
        SeedOutcome::Seeded { branches, products } => {
            info!(branches, products, "Catalog seeded");
        }
    }
    Ok(())
}

fn warn_if_in_memory(config: &StorefrontConfig) {
    if config.database_url.expose_secret().contains(":memory:") {
        warn!("STOREFRONT_DATABASE_URL is in-memory; changes are discarded on exit");
    }
}
