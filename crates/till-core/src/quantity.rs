//! # Quantity Module
//!
//! A count of units. Quantities model physical stock and can never go
//! below zero: every operation that would make them negative clamps to 0.
//!
//! ## Usage
//! ```rust
//! use till_core::quantity::Quantity;
//!
//! let mut qty = Quantity::new(5);
//! assert_eq!(qty.add_delta(-50), 0);
//!
//! assert_eq!(Quantity::new(-3).value(), 0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative count of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64")]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity. Negative input is clamped to zero.
    #[inline]
    pub const fn new(value: i64) -> Self {
        if value < 0 {
            Quantity(0)
        } else {
            Quantity(value)
        }
    }

    /// Returns the count.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Checks if the count is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds `delta` in place and returns the new count.
    ///
    /// The result never drops below zero:
    /// ```text
    /// current 9, delta  -2  →  7
    /// current 1, delta -50  →  0   (not -49)
    /// ```
    pub fn add_delta(&mut self, delta: i64) -> i64 {
        self.0 = self.0.saturating_add(delta).max(0);
        self.0
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity::new(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_negative() {
        assert_eq!(Quantity::new(-1).value(), 0);
        assert_eq!(Quantity::new(i64::MIN).value(), 0);
        assert_eq!(Quantity::new(0).value(), 0);
        assert_eq!(Quantity::new(42).value(), 42);
    }

    #[test]
    fn test_add() {
        let mut qty = Quantity::new(9);
        assert_eq!(qty.add_delta(-2), 7);
        assert_eq!(qty.value(), 7);

        assert_eq!(qty.add_delta(3), 10);
        assert_eq!(qty.add_delta(0), 10);
    }

    #[test]
    fn test_add_clamps_at_zero() {
        let mut qty = Quantity::new(5);
        assert_eq!(qty.add_delta(-50), 0);
        assert!(qty.is_zero());

        let mut qty = Quantity::new(1);
        assert_eq!(qty.add_delta(-50), 0);
    }

    #[test]
    fn test_add_saturates_on_overflow() {
        let mut qty = Quantity::new(i64::MAX - 1);
        assert_eq!(qty.add_delta(10), i64::MAX);
    }

    #[test]
    fn test_deserialize_clamps() {
        let qty: Quantity = serde_json::from_str("-4").unwrap();
        assert_eq!(qty.value(), 0);

        let qty: Quantity = serde_json::from_str("3").unwrap();
        assert_eq!(qty.value(), 3);
    }
}
