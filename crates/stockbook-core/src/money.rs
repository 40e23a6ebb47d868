//! # Money Module
//!
//! Provides the `Money` type for prices and revenue.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a day of sales in f64:                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer units of the store currency                     │
//! │    The shop prices in FCFA, which has no minor unit, so one Money      │
//! │    unit is one franc. Revenue totals are exact integer sums.           │
//! │    Sums and products saturate at the i64 bounds instead of wrapping.   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockbook_core::money::Money;
//!
//! let price = Money::from_units(500);
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.units(), 1500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole units of the store currency.
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price ──┬──► revenue = quantity × unit_price ──► RevenuePoint
///                      │
///                      └──► category value = Σ quantity × unit_price
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(500).units(), 500);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
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

    /// Multiplies a unit price by a quantity, saturating on overflow.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Riz 500
    /// Sortie:  3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Revenue contribution: 1500
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain integer rendering; the currency symbol is a presentation concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(1500);
        assert_eq!(money.units(), 1500);
        assert!(!money.is_zero());
        assert!(!money.is_negative());
    }

    #[test]
    fn test_display_is_plain_integer() {
        assert_eq!(Money::from_units(1500).to_string(), "1500");
        assert_eq!(Money::zero().to_string(), "0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!(b.multiply_quantity(3).units(), 1500);

        let mut total = Money::zero();
        total += a;
        assert_eq!(total, a);
    }

    #[test]
    fn test_largest_line_amount_saturates() {
        let price = Money::from_units(crate::MAX_AMOUNT);
        let line = price.multiply_quantity(crate::MAX_AMOUNT);
        assert_eq!(line.units(), i64::MAX);

        let total: Money = [line, line, Money::from_units(1)].into_iter().sum();
        assert_eq!(total.units(), i64::MAX);

        let mut running = line;
        running += price;
        assert_eq!(running.units(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 650].into_iter().map(Money::from_units).sum();
        assert_eq!(total.units(), 1000);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::from_units(500)).unwrap();
        assert_eq!(json, "500");
    }
}
