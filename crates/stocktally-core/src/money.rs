//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float prices over a sales log drifts:                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  Revenue, COGS and profit are sums over every sale of a store, so the   │
//! │  drift would show up on the dashboard.                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    cost, price, unit_price, unit_cost and every metric are i64 cents    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stocktally_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price.multiply_quantity(3); // $32.97
//! let total: Money = [line, Money::from_cents(3)].into_iter().sum();
//! assert_eq!(total.cents(), 3300);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: profit is negative when goods are sold below cost
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a bare integer**: snapshots store cents directly
/// - **Saturating arithmetic**: sums and products clamp at the `i64` bounds
///   instead of overflowing
///
/// ## Where Money is Used
/// ```text
/// Product.cost ──┬──► Sale.unit_cost (frozen) ──► COGS ──┐
///                │                                       ├──► Profit
/// Product.price ─┴──► Sale.unit_price (frozen) ─► Revenue┘
///
/// Product.cost × Product.stock ──► Inventory value
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use stocktally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// Used for `quantity × unit_price`, `quantity × unit_cost` and
    /// `cost × stock`.
    ///
    /// ## Example
    /// ```rust
    /// use stocktally_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$12.34`.
///
/// ## Note
/// This is for logs and debugging. The CLI formats with the configured
/// currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().unsigned_abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a count (stock or quantity).
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-$0.05");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(1);
        assert_eq!(c.cents(), 1499);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);

        assert_eq!(max.multiply_quantity(2), max);
        assert_eq!(
            Money::from_cents(-3).multiply_quantity(u32::MAX).cents(),
            -3 * i64::from(u32::MAX)
        );
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(min - Money::from_cents(1), min);

        let mut acc = max;
        acc += max;
        assert_eq!(acc, max);
        acc -= min;
        assert_eq!(acc, max);

        let total: Money = [max, max, max].into_iter().sum();
        assert_eq!(total, max);
        assert_eq!(format!("{min}"), "-$92233720368547758.08");
    }

    #[test]
    fn test_sum() {
        let values = [Money::from_cents(100), Money::from_cents(250), Money::from_cents(-50)];
        let owned: Money = values.into_iter().sum();
        let borrowed: Money = values.iter().sum();
        assert_eq!(owned.cents(), 300);
        assert_eq!(borrowed, owned);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(-100).is_negative());
        assert!(!Money::from_cents(100).is_negative());
    }

    #[test]
    fn test_serializes_as_bare_cents() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "1250");
        let back: Money = serde_json::from_str("1250").unwrap();
        assert_eq!(back.cents(), 1250);
    }
}
