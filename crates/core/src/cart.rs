//! Client-side shopping cart.
//!
//! The cart lives only in client memory and is never sent to the server.
//! Adding a product always appends a new line, even when the same product is
//! already in the cart; quantity changes and removals act on the first line
//! carrying the given product id.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::{Price, format_amount};

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    /// Price at the moment the product was added.
    pub price: Price,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price × quantity for this line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}

/// Errors returned by [`Cart::checkout`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Your cart is empty!")]
    EmptyCart,
    #[error("Please enter your email address")]
    MissingEmail,
}

/// Result of a successful checkout. No order is recorded anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfirmation {
    pub total: Decimal,
    pub email: String,
    pub line_count: usize,
}

impl CheckoutConfirmation {
    /// Message shown to the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Thank you for your order! Total: ${}\nYou will receive confirmation at {}.",
            format_amount(self.total),
            self.email
        )
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new line with quantity 1.
    pub fn add(&mut self, product_id: ProductId, name: impl Into<String>, price: Price) {
        self.lines.push(CartLine {
            product_id,
            name: name.into(),
            price,
            quantity: 1,
        });
    }

    /// Set the quantity of the first line for `product_id`.
    ///
    /// A quantity of zero or less removes that line. Returns `false` if the
    /// product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };

        if quantity <= 0 {
            self.lines.remove(index);
            return true;
        }

        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        true
    }

    /// Remove the first line for `product_id`, returning it.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLine> {
        self.position(product_id).map(|index| self.lines.remove(index))
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price × quantity across all lines, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Total rendered with two decimal places.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        format_amount(self.total())
    }

    /// Sum of quantities across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Confirm the order and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to buy and
    /// `CheckoutError::MissingEmail` if `email` is blank. The cart is left
    /// untouched on error.
    pub fn checkout(&mut self, email: &str) -> Result<CheckoutConfirmation, CheckoutError> {
        if self.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(CheckoutError::MissingEmail);
        }

        let confirmation = CheckoutConfirmation {
            total: self.total(),
            email: email.to_owned(),
            line_count: self.lines.len(),
        };
        self.clear();
        Ok(confirmation)
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn rug() -> (ProductId, &'static str, Price) {
        (ProductId::new(1), "Afghan Rug", Price::from_cents(4999))
    }

    #[test]
    fn test_add_same_product_twice_appends_two_lines() {
        let mut cart = Cart::new();
        let (id, name, price) = rug();
        cart.add(id, name, price);
        cart.add(id, name, price);

        assert_eq!(cart.lines().len(), 2);
        assert!(cart.lines().iter().all(|line| line.quantity == 1));
        assert_eq!(cart.formatted_total(), "99.98");
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_set_quantity_overwrites_first_line() {
        let mut cart = Cart::new();
        let (id, name, price) = rug();
        cart.add(id, name, price);
        cart.add(ProductId::new(2), "Green Tea", Price::from_cents(599));

        assert!(cart.set_quantity(id, 3));
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.formatted_total(), "155.96");
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let (id, name, price) = rug();
        cart.add(id, name, price);
        cart.add(ProductId::new(2), "Green Tea", Price::from_cents(599));

        assert!(cart.set_quantity(id, 0));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].name, "Green Tea");
        assert_eq!(cart.formatted_total(), "5.99");

        assert!(cart.set_quantity(ProductId::new(2), -4));
        assert!(cart.is_empty());
        assert_eq!(cart.formatted_total(), "0.00");
    }

    #[test]
    fn test_set_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        let (id, name, price) = rug();
        cart.add(id, name, price);

        assert!(!cart.set_quantity(ProductId::new(99), 5));
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_takes_first_matching_line_only() {
        let mut cart = Cart::new();
        let (id, name, price) = rug();
        cart.add(id, name, price);
        cart.add(id, name, price);

        let removed = cart.remove(id).unwrap();
        assert_eq!(removed.name, "Afghan Rug");
        assert_eq!(cart.lines().len(), 1);
        assert!(cart.remove(ProductId::new(5)).is_none());
    }

    #[test]
    fn test_checkout_requires_items_and_email() {
        let mut cart = Cart::new();
        assert_eq!(cart.checkout("a@b.c"), Err(CheckoutError::EmptyCart));

        let (id, name, price) = rug();
        cart.add(id, name, price);
        assert_eq!(cart.checkout("  "), Err(CheckoutError::MissingEmail));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_total_of_largest_lines_does_not_overflow() {
        let mut cart = Cart::new();
        let (id, name, _) = rug();
        cart.add(id, name, Price::MAX);
        cart.add(ProductId::new(2), "Palace Rug", Price::MAX);
        cart.set_quantity(id, i64::MAX);
        cart.set_quantity(ProductId::new(2), i64::MAX);

        let line = Decimal::from(1_000_000_000_000_i64) * Decimal::from(u32::MAX);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
        assert_eq!(cart.total(), line + line);
        assert!(!cart.formatted_total().is_empty());
    }

    #[test]
    fn test_checkout_clears_cart_and_reports_total() {
        let mut cart = Cart::new();
        let (id, name, price) = rug();
        cart.add(id, name, price);
        cart.set_quantity(id, 2);

        let confirmation = cart.checkout("farid@example.af").unwrap();
        assert!(cart.is_empty());
        assert_eq!(format_amount(confirmation.total), "99.98");
        assert_eq!(
            confirmation.message(),
            "Thank you for your order! Total: $99.98\nYou will receive confirmation at farid@example.af."
        );
    }
}
