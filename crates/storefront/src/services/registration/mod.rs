//! Customer registration service.
//!
//! Registration collects contact details only. Every customer receives the
//! same placeholder password, which is stored as an Argon2id hash so the
//! plaintext never reaches the database or any response.

mod error;

pub use error::RegistrationError;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use bazaar_core::{Customer, PLACEHOLDER_PASSWORD, RegisterCustomerRequest};

use crate::db::RepositoryError;
use crate::db::customers::CustomerRepository;

/// Registration service.
pub struct RegistrationService<'a> {
    customers: CustomerRepository<'a>,
}

impl<'a> RegistrationService<'a> {
    /// Create a new registration service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            customers: CustomerRepository::new(pool),
        }
    }

    /// Register a customer.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::Validation` if name or email is missing or
    /// the email is malformed.
    /// Returns `RegistrationError::AlreadyRegistered` if the email exists.
    pub async fn register(
        &self,
        request: &RegisterCustomerRequest,
    ) -> Result<Customer, RegistrationError> {
        let customer = request.validate()?;
        let password_hash = hash_password(PLACEHOLDER_PASSWORD)?;

        let created = self
            .customers
            .create(&customer, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => RegistrationError::AlreadyRegistered,
                other => RegistrationError::Repository(other),
            })?;

        tracing::info!(customer_id = %created.id, "Customer registered");
        Ok(created)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, RegistrationError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| RegistrationError::PasswordHash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};
    use bazaar_core::ValidationError;

    use super::*;
    use crate::db::test_support;

    fn request(name: &str, email: &str) -> RegisterCustomerRequest {
        RegisterCustomerRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some("+93 70 123 4567".into()),
            address: Some("Street 7".into()),
            city: Some("Kabul".into()),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hashed_placeholder() {
        let pool = test_support::pool(false).await;
        let service = RegistrationService::new(&pool);

        let customer = service
            .register(&request("Farid", "farid@example.af"))
            .await
            .unwrap();

        let stored = CustomerRepository::new(&pool)
            .password_hash(&customer.email)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored, PLACEHOLDER_PASSWORD);

        let parsed = PasswordHash::new(&stored).unwrap();
        assert!(
            Argon2::default()
                .verify_password(PLACEHOLDER_PASSWORD.as_bytes(), &parsed)
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_register_rejects_missing_email() {
        let pool = test_support::pool(false).await;
        let service = RegistrationService::new(&pool);

        let err = service
            .register(&RegisterCustomerRequest {
                name: Some("Farid".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::Validation(ValidationError::MissingField("email"))
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let pool = test_support::pool(false).await;
        let service = RegistrationService::new(&pool);

        service
            .register(&request("Farid", "farid@example.af"))
            .await
            .unwrap();
        let err = service
            .register(&request("Farid Again", "farid@example.af"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::AlreadyRegistered));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_in_other_case() {
        let pool = test_support::pool(false).await;
        let service = RegistrationService::new(&pool);

        let customer = service
            .register(&request("Farid", "farid@example.af"))
            .await
            .unwrap();
        assert_eq!(customer.email.as_str(), "farid@example.af");

        let err = service
            .register(&request("Farid", "Farid@Example.AF"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::AlreadyRegistered));
    }
}
