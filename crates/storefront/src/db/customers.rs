//! Customer repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use bazaar_core::{Customer, CustomerId, Email, NewCustomer};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: CustomerId,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            phone: row.phone,
            address: row.address,
            city: row.city,
            created_at: row.created_at,
        })
    }
}

/// Repository for customer records.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a customer with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        customer: &NewCustomer,
        password_hash: &str,
    ) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            INSERT INTO customers (name, email, phone, address, city, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, email, phone, address, city, created_at
            ",
        )
        .bind(&customer.name)
        .bind(customer.email.as_str())
        .bind(customer.phone.as_deref())
        .bind(customer.address.as_deref())
        .bind(customer.city.as_deref())
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Customer::try_from(row)
    }

    /// Stored password hash for an email, if registered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn password_hash(&self, email: &Email) -> Result<Option<String>, RepositoryError> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM customers WHERE email = ?",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;
        Ok(hash)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support;

    fn amina() -> NewCustomer {
        NewCustomer {
            name: "Amina".into(),
            email: Email::parse("amina@example.af").unwrap(),
            phone: None,
            address: Some("Street 4".into()),
            city: Some("Herat".into()),
        }
    }

    #[tokio::test]
    async fn test_create_returns_record() {
        let pool = test_support::pool(false).await;
        let repo = CustomerRepository::new(&pool);

        let customer = repo.create(&amina(), "hash").await.unwrap();
        assert_eq!(customer.name, "Amina");
        assert_eq!(customer.email.as_str(), "amina@example.af");
        assert_eq!(customer.city.as_deref(), Some("Herat"));
        assert_eq!(
            repo.password_hash(&customer.email).await.unwrap().as_deref(),
            Some("hash")
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let pool = test_support::pool(false).await;
        let repo = CustomerRepository::new(&pool);

        repo.create(&amina(), "hash").await.unwrap();
        let err = repo.create(&amina(), "hash").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
