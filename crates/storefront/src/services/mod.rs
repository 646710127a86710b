//! Business logic services for storefront.
//!
//! # Services
//!
//! - `registration` - Customer sign-up with a server-assigned placeholder password

pub mod registration;

pub use registration::{RegistrationError, RegistrationService};
