//! # USPS Rate Estimator
//!
//! Derives the second carrier quote from the live UPS cost.
//!
//! The estimate is a pure function of the base cost and an injected
//! randomness source: cost is the base plus a bounded jitter, clamped at
//! zero and rounded to cents; transit time is a uniform 5-8 day draw.
//! Injecting [`Jitter`] keeps production on thread-local randomness while
//! tests substitute a fixed source.
//!
//! # Examples
//!
//! ```
//! use ship_quote::application::services::estimator::{FixedJitter, UspsEstimator};
//! use ship_quote::domain::value_objects::Cost;
//! use std::sync::Arc;
//!
//! let estimator = UspsEstimator::new(Arc::new(FixedJitter::new(2.5)));
//! let estimate = estimator.estimate(Cost::from_f64(100.0).unwrap());
//! assert_eq!(estimate.cost(), Cost::from_f64(102.5).unwrap());
//! ```

use crate::domain::value_objects::Cost;
use rand::Rng;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

/// Default jitter half-range applied to the base cost, in currency units.
pub const DEFAULT_ADJUSTMENT_RANGE: f64 = 10.0;

/// Lower bound of the transit-time draw, in days.
pub const MIN_TRANSIT_DAYS: f64 = 5.0;

/// Upper bound of the transit-time draw, in days.
pub const MAX_TRANSIT_DAYS: f64 = 8.0;

/// A source of uniform random draws.
///
/// The seam that makes the estimator testable: production uses
/// [`ThreadRngJitter`], deterministic tests use [`FixedJitter`].
pub trait Jitter: Send + Sync + fmt::Debug {
    /// Returns a value uniformly distributed in `[lo, hi]`.
    fn uniform(&self, lo: f64, hi: f64) -> f64;
}

/// Thread-local randomness, the production jitter source.
///
/// No seeding: draws are intentionally not reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngJitter;

impl Jitter for ThreadRngJitter {
    fn uniform(&self, lo: f64, hi: f64) -> f64 {
        rand::rng().random_range(lo..=hi)
    }
}

/// A jitter source that always returns the same value, clamped into range.
///
/// For deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter {
    value: f64,
}

impl FixedJitter {
    /// Creates a fixed jitter source.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Jitter for FixedJitter {
    fn uniform(&self, lo: f64, hi: f64) -> f64 {
        self.value.clamp(lo, hi)
    }
}

/// Draws a randomized transit-time estimate in whole days.
///
/// Uniform over [5, 8], rounded to the nearest integer.
#[must_use]
pub fn randomized_transit_days(jitter: &dyn Jitter) -> u32 {
    jitter.uniform(MIN_TRANSIT_DAYS, MAX_TRANSIT_DAYS).round() as u32
}

/// A derived USPS quote: cost plus transit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UspsEstimate {
    cost: Cost,
    transit_days: u32,
}

impl UspsEstimate {
    /// Returns the estimated cost.
    #[inline]
    #[must_use]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Returns the estimated transit time in days.
    #[inline]
    #[must_use]
    pub fn transit_days(&self) -> u32 {
        self.transit_days
    }
}

/// Derives a USPS quote from a live UPS cost.
#[derive(Debug, Clone)]
pub struct UspsEstimator {
    jitter: Arc<dyn Jitter>,
    adjustment_range: f64,
}

impl UspsEstimator {
    /// Creates an estimator with the default ±10.00 adjustment range.
    #[must_use]
    pub fn new(jitter: Arc<dyn Jitter>) -> Self {
        Self {
            jitter,
            adjustment_range: DEFAULT_ADJUSTMENT_RANGE,
        }
    }

    /// Sets a custom adjustment half-range.
    #[must_use]
    pub fn with_adjustment_range(mut self, range: f64) -> Self {
        self.adjustment_range = range.abs();
        self
    }

    /// Derives a USPS estimate from the UPS cost.
    ///
    /// `cost = max(0, ups_cost + uniform(-range, +range))` rounded to
    /// cents; `transit_days = round(uniform(5, 8))`. Each call draws fresh
    /// randomness.
    #[must_use]
    pub fn estimate(&self, ups_cost: Cost) -> UspsEstimate {
        let adjustment = self
            .jitter
            .uniform(-self.adjustment_range, self.adjustment_range);
        let adjusted =
            ups_cost.get() + Decimal::from_f64_retain(adjustment).unwrap_or(Decimal::ZERO);

        UspsEstimate {
            cost: Cost::clamped(adjusted),
            transit_days: randomized_transit_days(self.jitter.as_ref()),
        }
    }
}
