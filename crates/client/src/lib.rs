//! Bazaar Client - storefront API client and shop controller.
//!
//! - [`ApiClient`] - typed calls for every `/api` route
//! - [`ShopController`] - selection, cart and forms driven against the API,
//!   with static fallbacks when the server is unreachable

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod controller;
pub mod error;
pub mod fallback;

pub use api::{ApiClient, DEFAULT_API_URL, Health};
pub use controller::{Notice, NoticeKind, ShopController, ShopState};
pub use error::ClientError;
