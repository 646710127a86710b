//! JSON API handlers.

pub mod catalog;
pub mod customers;
pub mod health;
pub mod products;
