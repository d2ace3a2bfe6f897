//! # Address and AddressPair
//!
//! Shipment endpoints and the cache identity key.
//!
//! An [`AddressPair`] identifies a logical shipment: two pairs denote the
//! same shipment iff all twelve fields of both addresses match exactly.
//! Fields are trimmed at construction; no other normalization (case,
//! inner whitespace) is performed.
//!
//! # Examples
//!
//! ```
//! use ship_quote::domain::entities::address::Address;
//!
//! let addr = Address::new(" Ada ", "5551234", "1 Main St", "Austin", "TX", "73301").unwrap();
//! assert_eq!(addr.name(), "Ada");
//!
//! // Required fields must be non-empty after trimming
//! assert!(Address::new("", "5551234", "1 Main St", "Austin", "TX", "73301").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error raised when an address is missing a required field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required field: {field}")]
pub struct MissingField {
    /// The bare field name (`name`, `phone`, `addr`, `city`, `state`, `zip`).
    pub field: &'static str,
}

/// A shipment endpoint.
///
/// All six fields are required and stored trimmed. Equality is structural,
/// field for field, which makes `Address` usable as part of the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    name: String,
    phone: String,
    addr: String,
    city: String,
    state: String,
    zip: String,
}

impl Address {
    /// Creates an address, trimming every field.
    ///
    /// # Errors
    ///
    /// Returns [`MissingField`] naming the first field that is empty after
    /// trimming.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        addr: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Result<Self, MissingField> {
        fn required(value: String, field: &'static str) -> Result<String, MissingField> {
            let trimmed = value.trim().to_owned();
            if trimmed.is_empty() {
                Err(MissingField { field })
            } else {
                Ok(trimmed)
            }
        }

        Ok(Self {
            name: required(name.into(), "name")?,
            phone: required(phone.into(), "phone")?,
            addr: required(addr.into(), "addr")?,
            city: required(city.into(), "city")?,
            state: required(state.into(), "state")?,
            zip: required(zip.into(), "zip")?,
        })
    }

    /// Returns the contact name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the phone number.
    #[inline]
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the street address line.
    #[inline]
    #[must_use]
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Returns the city.
    #[inline]
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the state code.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the postal code.
    #[inline]
    #[must_use]
    pub fn zip(&self) -> &str {
        &self.zip
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {} {}",
            self.name, self.addr, self.city, self.state, self.zip
        )
    }
}

/// A sender/receiver address tuple, the cache and dedup key for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressPair {
    sender: Address,
    receiver: Address,
}

impl AddressPair {
    /// Creates an address pair.
    #[must_use]
    pub fn new(sender: Address, receiver: Address) -> Self {
        Self { sender, receiver }
    }

    /// Returns the sender address.
    #[inline]
    #[must_use]
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// Returns the receiver address.
    #[inline]
    #[must_use]
    pub fn receiver(&self) -> &Address {
        &self.receiver
    }
}

impl fmt::Display for AddressPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.sender.name, self.receiver.name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_address(name: &str) -> Address {
        Address::new(name, "5551234", "1 Main St", "Austin", "TX", "73301").unwrap()
    }

    #[test]
    fn new_trims_fields() {
        let addr = Address::new(" Ada ", " 5551234 ", "1 Main St", "Austin", " TX", "73301 ")
            .unwrap();
        assert_eq!(addr.name(), "Ada");
        assert_eq!(addr.phone(), "5551234");
        assert_eq!(addr.state(), "TX");
        assert_eq!(addr.zip(), "73301");
    }

    #[test]
    fn new_rejects_empty_field() {
        let err = Address::new("Ada", "  ", "1 Main St", "Austin", "TX", "73301").unwrap_err();
        assert_eq!(err.field, "phone");
        assert!(err.to_string().contains("phone"));
    }

    #[test]
    fn equality_is_structural() {
        let a = test_address("Ada");
        let b = test_address("Ada");
        assert_eq!(a, b);

        // Trimming happens before comparison, so padded input is identical
        let c = Address::new("Ada ", "5551234", "1 Main St", "Austin", "TX", "73301").unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn case_is_not_normalized() {
        let a = test_address("Ada");
        let b = test_address("ada");
        assert_ne!(a, b);
    }

    #[test]
    fn pair_identity() {
        let pair_a = AddressPair::new(test_address("Ada"), test_address("Grace"));
        let pair_b = AddressPair::new(test_address("Ada"), test_address("Grace"));
        let pair_c = AddressPair::new(test_address("Grace"), test_address("Ada"));
        assert_eq!(pair_a, pair_b);
        assert_ne!(pair_a, pair_c);
    }
}
