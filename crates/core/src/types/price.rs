//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are non-negative decimals in the store's single currency. They are
//! serialized as plain JSON numbers (`49.99`) and rendered with two decimal
//! places for display.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount is above [`Price::MAX`].
    #[error("price cannot exceed 1000000000000")]
    TooLarge,
    /// The amount has fractions of a cent.
    #[error("price can have at most 2 decimal places")]
    TooPrecise,
}

/// A non-negative price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted price. Keeps every amount exactly representable as
    /// a JSON float and cart arithmetic far from `Decimal::MAX`.
    pub const MAX: Self = Self(Decimal::from_parts(3_567_587_328, 232, 0, false, 0));

    /// Decimal places a price may carry.
    pub const SCALE: u32 = 2;

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the amount is below zero,
    /// `PriceError::TooLarge` above [`Price::MAX`] and
    /// `PriceError::TooPrecise` with more than two decimal places.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge);
        }
        if amount.normalize().scale() > Self::SCALE {
            return Err(PriceError::TooPrecise);
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse a price from its textual form (e.g. `"12.99"`).
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotANumber` if the input is not a decimal and
    /// `PriceError::Negative` if it is below zero.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }
}

/// Render a decimal amount with exactly two decimal places.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let price = Price::parse("49.99").unwrap();
        assert_eq!(price.amount(), Decimal::new(4999, 2));
        assert_eq!(Price::parse(" 0 ").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage_and_negatives() {
        assert_eq!(Price::parse("abc"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse(""), Err(PriceError::NotANumber));
        assert_eq!(Price::parse("-1.50"), Err(PriceError::Negative));
    }

    #[test]
    fn test_display_uses_two_decimals() {
        assert_eq!(Price::parse("5").unwrap().to_string(), "5.00");
        assert_eq!(Price::parse("12.9").unwrap().to_string(), "12.90");
        assert_eq!(Price::from_cents(4999).to_string(), "49.99");
    }

    #[test]
    fn test_times() {
        let price = Price::from_cents(4999);
        assert_eq!(format_amount(price.times(3)), "149.97");
    }

    #[test]
    fn test_max_is_one_trillion() {
        assert_eq!(Price::MAX.amount(), Decimal::from(1_000_000_000_000_i64));
        assert_eq!(Price::parse("1000000000000").unwrap(), Price::MAX);
        assert_eq!(
            Price::parse("1000000000000.01"),
            Err(PriceError::TooLarge)
        );
        assert_eq!(
            Price::parse("50000000000000000000000000000"),
            Err(PriceError::TooLarge)
        );
    }

    #[test]
    fn test_rejects_fractions_of_a_cent() {
        assert_eq!(Price::parse("1.999"), Err(PriceError::TooPrecise));
        assert_eq!(Price::parse("1.5").unwrap().to_string(), "1.50");
        // Trailing zeros are not extra precision
        assert_eq!(Price::parse("2.5000").unwrap().to_string(), "2.50");
    }

    #[test]
    fn test_times_at_the_limits_does_not_overflow() {
        let expected = Decimal::from(1_000_000_000_000_i64) * Decimal::from(u32::MAX);
        assert_eq!(Price::MAX.times(u32::MAX), expected);
    }

    #[test]
    fn test_largest_price_survives_json() {
        let price = Price::parse("999999999999.99").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Price::from_cents(599)).unwrap();
        assert_eq!(json, "5.99");
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("\"-3\"");
        assert!(result.is_err());
    }
}
