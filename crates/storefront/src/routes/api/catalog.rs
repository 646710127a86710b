//! Derived catalog lists: categories, cities and branches.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use bazaar_core::Branch;
use bazaar_core::types::catalog::active;

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::state::AppState;

/// Query parameters for `GET /api/branches`.
#[derive(Debug, Default, Deserialize)]
pub struct BranchQuery {
    pub city: Option<String>,
}

/// Distinct product categories, ascending.
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let categories = CatalogRepository::new(state.pool()).categories().await?;
    Ok(Json(categories))
}

/// Distinct branch cities, ascending.
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn cities(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let cities = CatalogRepository::new(state.pool()).cities().await?;
    Ok(Json(cities))
}

/// Branches, optionally scoped to a city (`all` means every city).
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an unreadable query string and
/// `AppError::Database` if the query fails.
pub async fn branches(
    State(state): State<AppState>,
    query: std::result::Result<Query<BranchQuery>, QueryRejection>,
) -> Result<Json<Vec<Branch>>> {
    let Query(query) = query?;
    let city = active(query.city.as_deref());
    let branches = CatalogRepository::new(state.pool()).branches(city).await?;
    Ok(Json(branches))
}
