//! # Quote Record
//!
//! The persisted, immutable result of resolving one address pair.
//!
//! A record is created exactly once per distinct [`AddressPair`] (first
//! writer wins) and never mutated. Every later lookup of the same pair is
//! served from the stored record without touching the carrier API.

use crate::domain::entities::address::AddressPair;
use crate::domain::value_objects::{Carrier, Cost, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted outcome of one shipment-quote resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// The shipment identity this record was computed for.
    pair: AddressPair,
    /// Live UPS charge.
    ups_cost: Cost,
    /// Derived USPS estimate.
    usps_cost: Cost,
    /// Estimated UPS transit time in days.
    ups_days: u32,
    /// Estimated USPS transit time in days.
    usps_days: u32,
    /// Retrievable label URL, when the label was persisted.
    label_url: Option<String>,
    /// When this record was created.
    created_at: Timestamp,
}

impl QuoteRecord {
    /// Creates a new record stamped with the current time.
    #[must_use]
    pub fn new(
        pair: AddressPair,
        ups_cost: Cost,
        usps_cost: Cost,
        ups_days: u32,
        usps_days: u32,
        label_url: Option<String>,
    ) -> Self {
        Self {
            pair,
            ups_cost,
            usps_cost,
            ups_days,
            usps_days,
            label_url,
            created_at: Timestamp::now(),
        }
    }

    /// Creates a record from parts (for reconstruction).
    #[must_use]
    pub fn from_parts(
        pair: AddressPair,
        ups_cost: Cost,
        usps_cost: Cost,
        ups_days: u32,
        usps_days: u32,
        label_url: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            pair,
            ups_cost,
            usps_cost,
            ups_days,
            usps_days,
            label_url,
            created_at,
        }
    }

    /// Returns the shipment identity.
    #[inline]
    #[must_use]
    pub fn pair(&self) -> &AddressPair {
        &self.pair
    }

    /// Returns the UPS charge.
    #[inline]
    #[must_use]
    pub fn ups_cost(&self) -> Cost {
        self.ups_cost
    }

    /// Returns the USPS estimate.
    #[inline]
    #[must_use]
    pub fn usps_cost(&self) -> Cost {
        self.usps_cost
    }

    /// Returns the UPS transit days.
    #[inline]
    #[must_use]
    pub fn ups_days(&self) -> u32 {
        self.ups_days
    }

    /// Returns the USPS transit days.
    #[inline]
    #[must_use]
    pub fn usps_days(&self) -> u32 {
        self.usps_days
    }

    /// Returns the label URL, if a label was persisted.
    #[inline]
    #[must_use]
    pub fn label_url(&self) -> Option<&str> {
        self.label_url.as_deref()
    }

    /// Returns when the record was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the cheaper service and its cost.
    ///
    /// A tie resolves to UPS.
    #[must_use]
    pub fn optimal(&self) -> (Carrier, Cost) {
        if self.ups_cost <= self.usps_cost {
            (Carrier::Ups, self.ups_cost)
        } else {
            (Carrier::Usps, self.usps_cost)
        }
    }
}

impl fmt::Display for QuoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuoteRecord({}: UPS {} / USPS {})",
            self.pair, self.ups_cost, self.usps_cost
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::address::Address;

    fn test_pair() -> AddressPair {
        let sender = Address::new("Ada", "5551234", "1 Main St", "Austin", "TX", "73301").unwrap();
        let receiver =
            Address::new("Grace", "5555678", "2 Oak Ave", "Boston", "MA", "02101").unwrap();
        AddressPair::new(sender, receiver)
    }

    fn record(ups: f64, usps: f64) -> QuoteRecord {
        QuoteRecord::new(
            test_pair(),
            Cost::from_f64(ups).unwrap(),
            Cost::from_f64(usps).unwrap(),
            6,
            7,
            None,
        )
    }

    #[test]
    fn optimal_picks_cheaper_ups() {
        let (carrier, cost) = record(10.00, 12.00).optimal();
        assert_eq!(carrier, Carrier::Ups);
        assert_eq!(cost, Cost::from_f64(10.00).unwrap());
    }

    #[test]
    fn optimal_picks_cheaper_usps() {
        let (carrier, cost) = record(15.00, 12.00).optimal();
        assert_eq!(carrier, Carrier::Usps);
        assert_eq!(cost, Cost::from_f64(12.00).unwrap());
    }

    #[test]
    fn optimal_tie_favors_ups() {
        let (carrier, _) = record(10.00, 10.00).optimal();
        assert_eq!(carrier, Carrier::Ups);
    }

    #[test]
    fn label_url_accessor() {
        let rec = QuoteRecord::new(
            test_pair(),
            Cost::ZERO,
            Cost::ZERO,
            5,
            5,
            Some("/media/shipping_labels/label_x.gif".to_owned()),
        );
        assert_eq!(rec.label_url(), Some("/media/shipping_labels/label_x.gif"));
    }
}
