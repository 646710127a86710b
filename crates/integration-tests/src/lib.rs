//! Integration tests for Bazaar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! Every test gets its own storefront on an ephemeral port, backed by a
//! fresh seeded in-memory database. Nothing external is required.
//!
//! # Test Categories
//!
//! - `storefront_api` - HTTP contract of the `/api` routes
//! - `shop_flow` - The client controller against a live server and offline

use std::net::SocketAddr;

use secrecy::SecretString;
use sqlx::SqlitePool;
use tokio::task::JoinHandle;

use bazaar_client::ApiClient;
use bazaar_storefront::config::DEFAULT_DATABASE_URL;
use bazaar_storefront::db;
use bazaar_storefront::state::AppState;

/// A storefront running in the background of the current test runtime.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub pool: SqlitePool,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a storefront with the demo catalog.
    ///
    /// # Panics
    ///
    /// Panics if the database or listener cannot be set up.
    #[allow(clippy::expect_used)]
    pub async fn new() -> Self {
        let url = SecretString::from(DEFAULT_DATABASE_URL);
        let pool = db::open_catalog(&url, true)
            .await
            .expect("Failed to open test catalog");

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = bazaar_storefront::app(AppState::new(pool.clone()));
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            pool,
            server,
        }
    }

    /// Absolute URL for an API path such as `/api/products`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Typed client pointed at this storefront.
    ///
    /// # Panics
    ///
    /// Panics if the base URL is rejected, which would be a bug.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.base_url).expect("Test base URL is valid")
    }

    /// Number of stored products, read straight from the database.
    ///
    /// # Panics
    ///
    /// Panics if the count query fails.
    #[allow(clippy::expect_used)]
    pub async fn product_count(&self) -> i64 {
        db::CatalogRepository::new(&self.pool)
            .count_products()
            .await
            .expect("Failed to count products")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// An address nothing listens on, for offline behavior.
#[must_use]
pub fn unreachable_url() -> String {
    "http://127.0.0.1:9".to_string()
}
