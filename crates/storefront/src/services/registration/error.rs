//! Registration error types.

use thiserror::Error;

use bazaar_core::ValidationError;

use crate::db::RepositoryError;

/// Errors that can occur while registering a customer.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The submitted fields are missing or malformed.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A customer with this email already exists.
    #[error("customer already registered")]
    AlreadyRegistered,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
