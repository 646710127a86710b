//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod email;
pub mod id;
pub mod price;

pub use catalog::{
    Branch, CreateProductRequest, Customer, NewCustomer, NewProduct, PLACEHOLDER_PASSWORD,
    Product, ProductFilter, RegisterCustomerRequest, ValidationError,
};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
