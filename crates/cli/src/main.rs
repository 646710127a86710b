//! Bazaar CLI - Database tools and a terminal shop.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! bazaar migrate
//!
//! # Seed the demo branches and products
//! bazaar seed
//!
//! # Check a running storefront
//! bazaar --api-url http://127.0.0.1:3000 health
//!
//! # List products in Kabul
//! bazaar products --city Kabul
//!
//! # Shop interactively
//! bazaar shop
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert the demo catalog into an empty database
//! - `health` - Storefront liveness
//! - `products` - List products, optionally filtered
//! - `shop` - Interactive shopping session

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use bazaar_client::{ApiClient, DEFAULT_API_URL};
use bazaar_core::ProductFilter;

mod commands;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar CLI tools")]
struct Cli {
    /// Storefront base URL
    #[arg(long, global = true, env = "BAZAAR_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the demo catalog
    Seed,
    /// Check that the storefront is up
    Health,
    /// List products
    Products {
        /// City name, or `all`
        #[arg(long)]
        city: Option<String>,

        /// Branch ID, or `all`
        #[arg(long)]
        branch: Option<String>,

        /// Category name, or `all`
        #[arg(long)]
        category: Option<String>,
    },
    /// Start an interactive shopping session
    Shop,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; RUST_LOG=debug shows HTTP calls
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::database::migrate().await?,
        Commands::Seed => commands::database::seed().await?,
        Commands::Health => {
            let api = ApiClient::new(&cli.api_url)?;
            commands::shop::health(&api).await?;
        }
        Commands::Products {
            city,
            branch,
            category,
        } => {
            let api = ApiClient::new(&cli.api_url)?;
            let filter = ProductFilter {
                city,
                branch,
                category,
            };
            commands::shop::products(&api, &filter).await?;
        }
        Commands::Shop => {
            let api = ApiClient::new(&cli.api_url)?;
            commands::shop::run(api).await?;
        }
    }
    Ok(())
}
