//! # Money Module
//!
//! Provides the `Pence` type for prices and totals.
//!
//! ## Why Integer Pence?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Pence                                            │
//! │    Every price, bundle price and total is a whole number of pence.     │
//! │    Prices are never negative, so the backing type is unsigned.         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Pence;
//! use till_core::quantity::Quantity;
//!
//! let unit_price = Pence::from_pence(50);
//! let line = unit_price.multiply_quantity(Quantity::new(3));
//! assert_eq!(line.pence(), 150);
//! assert_eq!(line.to_string(), "£1.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use crate::quantity::Quantity;

// =============================================================================
// Pence Type
// =============================================================================

/// A non-negative amount in the smallest currency unit.
///
/// Arithmetic saturates at `u64::MAX` rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pence(u64);

impl Pence {
    /// Creates an amount from pence.
    #[inline]
    pub const fn from_pence(pence: u64) -> Self {
        Pence(pence)
    }

    /// Returns the amount in pence.
    #[inline]
    pub const fn pence(&self) -> u64 {
        self.0
    }

    /// Returns the whole pounds portion.
    #[inline]
    pub const fn pounds(&self) -> u64 {
        self.0 / 100
    }

    /// Returns the pence portion (always 0-99).
    #[inline]
    pub const fn pence_part(&self) -> u64 {
        self.0 % 100
    }

    /// Zero pence.
    #[inline]
    pub const fn zero() -> Self {
        Pence(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit amount by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Unit price: 50p
    /// Quantity:   3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line price: £1.50
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: Quantity) -> Self {
        // Quantity is never negative
        *self * qty.value().unsigned_abs()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as pounds and pence, e.g. `£1.30`.
impl fmt::Display for Pence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}.{:02}", self.pounds(), self.pence_part())
    }
}

impl Add for Pence {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Pence(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Pence {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<u64> for Pence {
    type Output = Self;

    #[inline]
    fn mul(self, factor: u64) -> Self {
        Pence(self.0.saturating_mul(factor))
    }
}

impl Sum for Pence {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Pence::zero(), |acc, p| acc + p)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pence() {
        let money = Pence::from_pence(1099);
        assert_eq!(money.pence(), 1099);
        assert_eq!(money.pounds(), 10);
        assert_eq!(money.pence_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Pence::from_pence(130).to_string(), "£1.30");
        assert_eq!(Pence::from_pence(5).to_string(), "£0.05");
        assert_eq!(Pence::zero().to_string(), "£0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Pence::from_pence(130);
        let b = Pence::from_pence(50);

        assert_eq!((a + b).pence(), 180);
        assert_eq!((b * 3).pence(), 150);

        let mut total = Pence::zero();
        total += a;
        total += b;
        assert_eq!(total.pence(), 180);
    }

    #[test]
    fn test_sum() {
        let total: Pence = [10, 10, 30].into_iter().map(Pence::from_pence).sum();
        assert_eq!(total.pence(), 50);
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        assert_eq!((Pence::from_pence(u64::MAX) + Pence::from_pence(1)).pence(), u64::MAX);
        assert_eq!((Pence::from_pence(u64::MAX) * 2).pence(), u64::MAX);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit = Pence::from_pence(20);
        assert_eq!(unit.multiply_quantity(Quantity::new(4)).pence(), 80);
        assert!(unit.multiply_quantity(Quantity::new(0)).is_zero());
    }
}
