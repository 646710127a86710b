//! Customer registration handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use bazaar_core::{Customer, RegisterCustomerRequest};

use crate::error::Result;
use crate::services::RegistrationService;
use crate::state::AppState;

/// Register a customer. Responds `201 Created` with the stored record.
///
/// # Errors
///
/// Returns `AppError::Validation` if name or email is missing or malformed,
/// `AppError::Conflict` if the email is taken, `AppError::BadRequest` for an
/// unreadable body.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>)> {
    let Json(request) = payload?;
    let customer = RegistrationService::new(state.pool())
        .register(&request)
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}
