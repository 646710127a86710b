//! Product handlers.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::instrument;

use bazaar_core::{CreateProductRequest, Product, ProductFilter};

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::state::AppState;

/// List products matching the optional `city`, `branch` and `category`
/// query parameters. `all` and empty values are ignored.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an unreadable query string and
/// `AppError::Database` if the query fails.
#[instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductFilter>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    let Query(filter) = query?;
    let products = CatalogRepository::new(state.pool())
        .list_products(&filter)
        .await?;
    tracing::debug!(?filter, count = products.len(), "Listed products");
    Ok(Json(products))
}

/// Add a product to the catalog.
///
/// Responds `201 Created` with the stored product.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an unreadable body,
/// `AppError::Validation` for invalid fields (nothing is written), and
/// `AppError::Database` if the insert fails.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(request) = payload?;
    let product = request.validate()?;

    let created = CatalogRepository::new(state.pool())
        .create_product(&product)
        .await?;

    tracing::info!(product_id = %created.id, name = %created.name, "Product created");
    Ok((StatusCode::CREATED, Json(created)))
}
