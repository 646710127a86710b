//! Bazaar Storefront library.
//!
//! The catalog store and JSON API as a library, so the binary, the CLI and
//! the integration tests all build the same router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

use state::AppState;

/// Build the storefront router with its request middleware.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(middleware::trace_layer())
        .with_state(state)
}
