//! Catalog records and the request payloads that create them.
//!
//! Request payloads are deliberately loose (`Option` fields, numbers that may
//! arrive as strings) so that every malformed submission surfaces as a
//! [`ValidationError`] instead of a deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::email::{Email, EmailError};
use super::id::{BranchId, CustomerId, ProductId};
use super::price::Price;

/// Password assigned to every customer created through registration.
///
/// Registration never asks for a password; this fixed value only exists so the
/// stored record has one. It is hashed before storage and never returned.
pub const PLACEHOLDER_PASSWORD: &str = "temp123";

/// Filter value meaning "no constraint on this axis".
const ALL: &str = "all";

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: Option<String>,
    /// City the product is sold in.
    pub location: Option<String>,
    pub branch_id: Option<BranchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// A physical store location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub city: String,
    pub address: String,
    pub phone: Option<String>,
    pub hours: Option<String>,
}

/// A registered customer, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Errors raised while validating a create request.
///
/// Validation always runs before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("price must be a non-negative amount of at most 1000000000000 with at most 2 decimal places")]
    InvalidPrice,

    #[error("branch_id must be an integer")]
    InvalidBranchId,

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

// =============================================================================
// Product creation
// =============================================================================

/// Body of `POST /api/products`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    /// A JSON number or a numeric string.
    pub price: Option<Value>,
    pub category: Option<String>,
    pub location: Option<String>,
    /// A JSON integer or an integer string.
    pub branch_id: Option<Value>,
}

/// A validated product ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub category: String,
    pub location: String,
    pub branch_id: BranchId,
}

impl CreateProductRequest {
    /// Build a well-formed request, as a seller form would submit it.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        price: Price,
        category: impl Into<String>,
        location: impl Into<String>,
        branch_id: BranchId,
    ) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(serde_json::json!(price)),
            category: Some(category.into()),
            location: Some(location.into()),
            branch_id: Some(Value::from(branch_id.as_i64())),
        }
    }

    /// Validate the request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if name, category or location is blank, the
    /// price is not a non-negative amount in whole cents up to `Price::MAX`,
    /// or `branch_id` is not an integer.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let name = required(self.name.as_deref(), "name")?;
        let price = parse_price(self.price.as_ref())?;
        let category = required(self.category.as_deref(), "category")?;
        let location = required(self.location.as_deref(), "location")?;
        let branch_id = parse_branch_id(self.branch_id.as_ref())?;

        Ok(NewProduct {
            name,
            price,
            category,
            location,
            branch_id,
        })
    }
}

fn parse_price(value: Option<&Value>) -> Result<Price, ValidationError> {
    let text = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => return Err(ValidationError::InvalidPrice),
    };
    Price::parse(&text).map_err(|_| ValidationError::InvalidPrice)
}

fn parse_branch_id(value: Option<&Value>) -> Result<BranchId, ValidationError> {
    let id = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.map(BranchId::new).ok_or(ValidationError::InvalidBranchId)
}

// =============================================================================
// Customer registration
// =============================================================================

/// Body of `POST /api/register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// A validated customer ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl RegisterCustomerRequest {
    /// Validate the request. Blank optional fields are stored as absent.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` when name or email is blank
    /// and `ValidationError::InvalidEmail` when the email is malformed.
    pub fn validate(&self) -> Result<NewCustomer, ValidationError> {
        let name = required(self.name.as_deref(), "name")?;
        let email = required(self.email.as_deref(), "email")?;
        let email = Email::parse(&email)?;

        Ok(NewCustomer {
            name,
            email,
            phone: optional(self.phone.as_deref()),
            address: optional(self.address.as_deref()),
            city: optional(self.city.as_deref()),
        })
    }
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    optional(value).ok_or(ValidationError::MissingField(field))
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

// =============================================================================
// Filtering
// =============================================================================

/// Query-time restriction on products.
///
/// Absent values, empty strings and the literal `all` impose no constraint;
/// the accessors apply that rule so a filter deserialized straight from a
/// query string can be used as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductFilter {
    /// A filter that matches every product.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to products located in `city`.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Restrict to products stocked by `branch`.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Restrict to products in `category`.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Active city constraint.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        active(self.city.as_deref())
    }

    /// Active branch constraint, as given by the caller.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        active(self.branch.as_deref())
    }

    /// Active category constraint.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        active(self.category.as_deref())
    }

    /// Whether no axis is constrained.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.city().is_none() && self.branch().is_none() && self.category().is_none()
    }
}

/// Returns the value unless it is blank or `all`.
#[must_use]
pub fn active(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != ALL)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product_request(body: Value) -> CreateProductRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_product_request_accepts_numbers_and_strings() {
        let request = product_request(json!({
            "name": "Afghan Rug",
            "price": 49.99,
            "category": "Home",
            "location": "Kabul",
            "branch_id": 1
        }));
        let product = request.validate().unwrap();
        assert_eq!(product.price, Price::from_cents(4999));
        assert_eq!(product.branch_id, BranchId::new(1));

        let request = product_request(json!({
            "name": "Green Tea",
            "price": "5.99",
            "category": "Grocery",
            "location": "Jalalabad",
            "branch_id": "2"
        }));
        let product = request.validate().unwrap();
        assert_eq!(product.price.to_string(), "5.99");
        assert_eq!(product.branch_id, BranchId::new(2));
    }

    #[test]
    fn test_product_request_missing_name() {
        let request = product_request(json!({
            "price": 1,
            "category": "Home",
            "location": "Kabul",
            "branch_id": 1
        }));
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_product_request_blank_location() {
        let request = product_request(json!({
            "name": "Hat",
            "price": 1,
            "category": "Clothing",
            "location": "   ",
            "branch_id": 1
        }));
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField("location"))
        );
    }

    #[test]
    fn test_product_request_bad_price() {
        for price in [
            json!(-1),
            json!("free"),
            json!(null),
            json!(true),
            json!("1.999"),
            json!(5e28),
            json!("50000000000000000000000000000"),
        ] {
            let request = product_request(json!({
                "name": "Hat",
                "price": price,
                "category": "Clothing",
                "location": "Kandahar",
                "branch_id": 1
            }));
            assert_eq!(request.validate(), Err(ValidationError::InvalidPrice));
        }
    }

    #[test]
    fn test_product_request_bad_branch() {
        for branch in [json!(1.5), json!("one"), json!(null)] {
            let request = product_request(json!({
                "name": "Hat",
                "price": 3,
                "category": "Clothing",
                "location": "Kandahar",
                "branch_id": branch
            }));
            assert_eq!(request.validate(), Err(ValidationError::InvalidBranchId));
        }
    }

    #[test]
    fn test_product_request_new_round_trips_through_validation() {
        let request = CreateProductRequest::new(
            "Saffron",
            Price::from_cents(1550),
            "Grocery",
            "Herat",
            BranchId::new(4),
        );
        let product = request.validate().unwrap();
        assert_eq!(product.name, "Saffron");
        assert_eq!(product.price.to_string(), "15.50");
    }

    #[test]
    fn test_register_request_requires_name_and_email() {
        let request = RegisterCustomerRequest {
            name: Some("Amina".into()),
            ..Default::default()
        };
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField("email"))
        );

        let request = RegisterCustomerRequest {
            email: Some("amina@example.af".into()),
            ..Default::default()
        };
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_register_request_blank_optionals_become_none() {
        let request = RegisterCustomerRequest {
            name: Some("Amina".into()),
            email: Some("amina@example.af".into()),
            phone: Some(String::new()),
            address: Some("  ".into()),
            city: Some("Herat".into()),
        };
        let customer = request.validate().unwrap();
        assert_eq!(customer.phone, None);
        assert_eq!(customer.address, None);
        assert_eq!(customer.city.as_deref(), Some("Herat"));
    }

    #[test]
    fn test_register_request_malformed_email() {
        let request = RegisterCustomerRequest {
            name: Some("Amina".into()),
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_filter_ignores_all_and_blank() {
        let filter = ProductFilter::all()
            .with_city("all")
            .with_branch("")
            .with_category("Home");
        assert_eq!(filter.city(), None);
        assert_eq!(filter.branch(), None);
        assert_eq!(filter.category(), Some("Home"));
        assert!(!filter.is_unfiltered());
        assert!(ProductFilter::all().with_city("all").is_unfiltered());
    }

    #[test]
    fn test_product_serialization_omits_absent_extras() {
        let product = Product {
            id: ProductId::new(1),
            name: "Afghan Rug".into(),
            price: Price::from_cents(4999),
            category: Some("Home".into()),
            location: Some("Kabul".into()),
            branch_id: None,
            branch_name: None,
            stock: None,
            description: None,
            rating: None,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["price"], json!(49.99));
        assert!(value.get("branch_name").is_none());
        assert!(value.get("stock").is_none());
    }
}
