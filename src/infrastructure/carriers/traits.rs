//! # Carrier Client Trait
//!
//! Port definition for live carrier integrations.
//!
//! The quoting pipeline talks to the external carrier through
//! [`CarrierClient`] only, so tests substitute stub carriers and the bulk
//! engine never knows which wire protocol sits behind the port.
//!
//! # Examples
//!
//! ```ignore
//! use ship_quote::infrastructure::carriers::traits::CarrierClient;
//!
//! struct MyCarrier { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl CarrierClient for MyCarrier {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::address::AddressPair;
use crate::domain::value_objects::{Carrier, Cost};
use crate::infrastructure::carriers::error::CarrierResult;
use async_trait::async_trait;
use std::fmt;

/// A live quote returned by a carrier's shipment-creation API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierQuote {
    total_cost: Cost,
    label_image: Option<String>,
    transit_days: u32,
}

impl CarrierQuote {
    /// Creates a carrier quote.
    #[must_use]
    pub fn new(total_cost: Cost, label_image: Option<String>, transit_days: u32) -> Self {
        Self {
            total_cost,
            label_image,
            transit_days,
        }
    }

    /// Returns the total charge.
    #[inline]
    #[must_use]
    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    /// Returns the base64-encoded label image, if the carrier returned one.
    #[inline]
    #[must_use]
    pub fn label_image(&self) -> Option<&str> {
        self.label_image.as_deref()
    }

    /// Returns the estimated transit time in days.
    #[inline]
    #[must_use]
    pub fn transit_days(&self) -> u32 {
        self.transit_days
    }

    /// Consumes the quote, returning the label image if any.
    #[must_use]
    pub fn into_label_image(self) -> Option<String> {
        self.label_image
    }
}

/// Trait defining the interface to a live shipping carrier.
///
/// # Error Handling
///
/// Methods return `CarrierResult<T>`; implementations map wire-level
/// failures to the appropriate [`CarrierError`](super::error::CarrierError)
/// variant. Implementations must bound every outbound call with the
/// configured timeout so a carrier outage surfaces as an error, never as a
/// hang.
#[async_trait]
pub trait CarrierClient: Send + Sync + fmt::Debug {
    /// Returns which carrier this client quotes.
    fn carrier(&self) -> Carrier;

    /// Returns the timeout in milliseconds applied to outbound calls.
    fn timeout_ms(&self) -> u64;

    /// Creates a shipment for the pair and returns the resulting quote.
    ///
    /// # Arguments
    ///
    /// * `access_token` - Opaque bearer token supplied by the caller
    /// * `pair` - The validated sender/receiver pair
    ///
    /// # Errors
    ///
    /// - `CarrierError::Timeout` - no response within the configured bound
    /// - `CarrierError::Connection` - network failure
    /// - `CarrierError::Status` - non-2xx response
    /// - `CarrierError::MalformedResponse` - body unparsable or missing the
    ///   total charge
    async fn create_shipment(
        &self,
        access_token: &str,
        pair: &AddressPair,
    ) -> CarrierResult<CarrierQuote>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn quote_accessors() {
        let quote = CarrierQuote::new(
            Cost::from_f64(104.55).unwrap(),
            Some("aGVsbG8=".to_owned()),
            6,
        );
        assert_eq!(quote.total_cost(), Cost::from_f64(104.55).unwrap());
        assert_eq!(quote.label_image(), Some("aGVsbG8="));
        assert_eq!(quote.transit_days(), 6);
    }

    #[test]
    fn quote_without_label() {
        let quote = CarrierQuote::new(Cost::ZERO, None, 5);
        assert!(quote.label_image().is_none());
        assert!(quote.into_label_image().is_none());
    }
}
