//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! # Catalog
//! GET  /api/products           - Products, optional city/branch/category filters
//! GET  /api/products/filter    - Same query, kept for older clients
//! POST /api/products           - Add a product (seller form)
//! GET  /api/categories         - Distinct product categories
//! GET  /api/cities             - Distinct branch cities
//! GET  /api/branches           - Branches, optional city filter
//!
//! # Customers
//! POST /api/register           - Register a customer
//!
//! # Health
//! GET  /api/health             - Liveness (always 200)
//! GET  /api/health/ready       - Readiness (database ping)
//! ```
//!
//! Any other path answers `404 {"error": ...}`.

pub mod api;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(api::products::list).post(api::products::create))
        .route("/products/filter", get(api::products::list))
        .route("/categories", get(api::catalog::categories))
        .route("/cities", get(api::catalog::cities))
        .route("/branches", get(api::catalog::branches))
        .route("/register", post(api::customers::register))
        .route("/health", get(api::health::health))
        .route("/health/ready", get(api::health::readiness))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
