//! Bazaar Core - Shared domain types.
//!
//! This crate provides the types used across all Bazaar components:
//! - `storefront` - Catalog store and JSON API
//! - `client` - API client and shop controller
//! - `cli` - Command-line tools for migrations, seeding and the terminal shop
//!
//! # Architecture
//!
//! The core crate contains only types and pure state - no I/O, no database
//! access, no HTTP clients. Cart and filter-selection logic live here so they
//! can be tested without a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails and catalog records
//! - [`cart`] - Client-side shopping cart
//! - [`selection`] - City/branch/category filter selection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod selection;
pub mod types;

pub use cart::{Cart, CartLine, CheckoutConfirmation, CheckoutError};
pub use selection::{Choice, Refresh, ShopSelection};
pub use types::*;
