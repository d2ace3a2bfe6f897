//! # Cost Value Object
//!
//! Monetary amount with domain invariants.
//!
//! This module provides the [`Cost`] type used for every monetary value in
//! the system: carrier charges, derived estimates, and optimal costs.
//!
//! # Invariants
//!
//! - Never negative
//! - Always rounded to 2 decimal places
//!
//! # Examples
//!
//! ```
//! use ship_quote::domain::value_objects::money::Cost;
//! use rust_decimal::Decimal;
//!
//! let cost = Cost::new(Decimal::new(10455, 2)).unwrap();
//! assert_eq!(cost.to_string(), "104.55");
//!
//! // Negative amounts are rejected
//! assert!(Cost::new(Decimal::new(-1, 0)).is_none());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-negative monetary amount rounded to 2 decimal places.
///
/// Wraps `rust_decimal::Decimal` so that money never rides around as a raw
/// float. Construction enforces the invariants; all accessors are cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(Decimal);

impl Cost {
    /// Zero cost.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a cost from a decimal amount.
    ///
    /// The amount is rounded to 2 decimal places. Returns `None` if the
    /// amount is negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        if amount.is_sign_negative() {
            return None;
        }
        Some(Self(rescaled(amount)))
    }

    /// Creates a cost from a decimal amount, clamping negatives to zero.
    ///
    /// Used where a derived amount may legitimately dip below zero and the
    /// contract is `max(0, amount)`.
    #[must_use]
    pub fn clamped(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self(rescaled(Decimal::ZERO))
        } else {
            Self(rescaled(amount))
        }
    }

    /// Creates a cost from an `f64` amount.
    ///
    /// Returns `None` if the amount is negative or not representable.
    #[must_use]
    pub fn from_f64(amount: f64) -> Option<Self> {
        Decimal::from_f64_retain(amount).and_then(Self::new)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }

    /// Returns the smaller of two costs.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }

    /// Returns true if this cost is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// Rounds to cents and pins the scale to 2 so Display and serde always
/// show `104.50`, never `104.5`.
fn rescaled(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Always show cents, e.g. "104.50" rather than "104.5".
        write!(f, "{:.2}", self.0)
    }
}

/// Error returned when parsing a [`Cost`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cost: {0}")]
pub struct ParseCostError(String);

impl FromStr for Cost {
    type Err = ParseCostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| ParseCostError(format!("{}: {}", s, e)))?;
        Self::new(amount).ok_or_else(|| ParseCostError(format!("{}: negative amount", s)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_rounds_to_two_places() {
        let cost = Cost::new(Decimal::new(104555, 3)).unwrap();
        assert_eq!(cost.get(), Decimal::new(10456, 2));
    }

    #[test]
    fn new_rejects_negative() {
        assert!(Cost::new(Decimal::new(-100, 2)).is_none());
    }

    #[test]
    fn clamped_floors_at_zero() {
        assert_eq!(Cost::clamped(Decimal::new(-5, 0)), Cost::ZERO);
        assert_eq!(
            Cost::clamped(Decimal::new(5, 0)),
            Cost::new(Decimal::new(5, 0)).unwrap()
        );
    }

    #[test]
    fn from_f64_round_trip() {
        let cost = Cost::from_f64(104.55).unwrap();
        assert_eq!(cost.to_string(), "104.55");
    }

    #[test]
    fn from_f64_rejects_negative() {
        assert!(Cost::from_f64(-0.01).is_none());
    }

    #[test]
    fn min_picks_smaller() {
        let a = Cost::from_f64(10.0).unwrap();
        let b = Cost::from_f64(9.99).unwrap();
        assert_eq!(a.min(b), b);
        assert_eq!(b.min(a), b);
    }

    #[test]
    fn parse_from_str() {
        let cost: Cost = "104.55".parse().unwrap();
        assert_eq!(cost, Cost::from_f64(104.55).unwrap());
        assert!(" 12.30 ".parse::<Cost>().is_ok());
        assert!("abc".parse::<Cost>().is_err());
        assert!("-1".parse::<Cost>().is_err());
    }

    #[test]
    fn display_always_shows_cents() {
        let cost = Cost::from_f64(104.5).unwrap();
        assert_eq!(cost.to_string(), "104.50");
    }

    #[test]
    fn ordering() {
        let a = Cost::from_f64(1.00).unwrap();
        let b = Cost::from_f64(2.00).unwrap();
        assert!(a < b);
    }
}
