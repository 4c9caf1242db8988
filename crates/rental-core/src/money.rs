//! # Money Module
//!
//! The `Money` type for catalog prices and order totals.
//!
//! ## Integer Cents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICE FLOW                                                             │
//! │                                                                         │
//! │  Prompt "9.99" ──► Money::parse ──► 999 cents ──► catalog.price_cents  │
//! │                                                                         │
//! │  catalog.price_cents × units ──► Σ lines ──► rental_order.total_cents  │
//! │                                                                         │
//! │  Display ──► "$9.99"                                                    │
//! │                                                                         │
//! │  No value ever passes through f32/f64, and no operation can overflow.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rental_core::money::Money;
//!
//! let price: Money = "9.99".parse().unwrap();
//! assert_eq!(price.cents(), 999);
//!
//! let line = price.multiply_quantity(2).unwrap();
//! assert_eq!(line.to_string(), "$19.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::validation::validate_price_cents;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that subtraction never wraps, although catalog prices and order
/// totals are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::money::Money;
    ///
    /// let price = Money::from_cents(450); // $4.50
    /// assert_eq!(price.cents(), 450);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses decimal text such as `"9.99"`, `"$4.5"` or `"12"`.
    ///
    /// At most two fractional digits are accepted; a missing second digit
    /// counts as zero (`"4.5"` is 450 cents). Negative amounts and amounts
    /// above [`MAX_PRICE_CENTS`](crate::MAX_PRICE_CENTS) are rejected.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::money::Money;
    ///
    /// assert_eq!(Money::parse("4.5").unwrap().cents(), 450);
    /// assert_eq!(Money::parse(" $12 ").unwrap().cents(), 1200);
    /// assert!(Money::parse("1.999").is_err());
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        const FIELD: &str = "price";

        let text = input.trim();
        let text = text.strip_prefix('$').unwrap_or(text);

        if text.is_empty() {
            return Err(ValidationError::Required {
                field: FIELD.to_string(),
            });
        }
        if text.starts_with('-') {
            return Err(ValidationError::MustBePositive {
                field: FIELD.to_string(),
            });
        }

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(ValidationError::invalid_format(FIELD, "expected a decimal amount"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ValidationError::invalid_format(FIELD, "expected a decimal amount"));
        }
        if fraction.len() > 2 {
            return Err(ValidationError::invalid_format(
                FIELD,
                "at most two decimal places",
            ));
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| ValidationError::invalid_format(FIELD, "amount is too large"))?
        };

        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().unwrap_or(0) * 10,
            _ => fraction.parse::<i64>().unwrap_or(0),
        };

        let total = dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .ok_or_else(|| ValidationError::invalid_format(FIELD, "amount is too large"))?;

        validate_price_cents(total)?;
        Ok(Money(total))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a quantity. `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(999);
    /// assert_eq!(unit_price.multiply_quantity(2).unwrap().cents(), 1998);
    /// assert!(Money::from_cents(i64::MAX).multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two amounts. `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(999);
        assert_eq!(money.cents(), 999);
        assert_eq!(money.dollars(), 9);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(999).to_string(), "$9.99");
        assert_eq!(Money::from_cents(450).to_string(), "$4.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_parse_accepts_common_forms() {
        assert_eq!(Money::parse("9.99").unwrap().cents(), 999);
        assert_eq!(Money::parse("4.50").unwrap().cents(), 450);
        assert_eq!(Money::parse("4.5").unwrap().cents(), 450);
        assert_eq!(Money::parse("12").unwrap().cents(), 1200);
        assert_eq!(Money::parse("12.").unwrap().cents(), 1200);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("$0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse("  3.00 ").unwrap().cents(), 300);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Money::parse("-1.00"),
            Err(ValidationError::MustBePositive { .. })
        ));
        for bad in [".", "abc", "1.2.3", "1,50", "1.999", "9.9x", "99999999999999999999"] {
            assert!(
                matches!(Money::parse(bad), Err(ValidationError::InvalidFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_prices_above_the_ceiling() {
        assert_eq!(
            Money::parse("999999.99").unwrap().cents(),
            crate::MAX_PRICE_CENTS
        );
        for too_big in ["1000000", "1000000.00", "92233720368547758.07"] {
            assert!(
                matches!(Money::parse(too_big), Err(ValidationError::OutOfRange { .. })),
                "{too_big} should be rejected"
            );
        }
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(999);
        let b = Money::from_cents(450);

        let total = a.multiply_quantity(2).and_then(|line| line.checked_add(b)).unwrap();
        assert_eq!(total.cents(), 2448);
        assert_eq!(total.to_string(), "$24.48");

        let huge = Money::from_cents(92_233_720_368_547_758_07);
        assert!(huge.multiply_quantity(2).is_none());
        assert!(huge.checked_add(huge).is_none());
    }
}
