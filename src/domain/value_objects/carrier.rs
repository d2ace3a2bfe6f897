//! # Carrier Identifier
//!
//! The two shipping-cost sources combined per quote.
//!
//! # Examples
//!
//! ```
//! use ship_quote::domain::value_objects::carrier::Carrier;
//!
//! assert_eq!(Carrier::Ups.to_string(), "UPS");
//! assert_eq!(Carrier::Usps.to_string(), "USPS");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A shipping carrier.
///
/// UPS is quoted live from the carrier API; USPS is derived from the UPS
/// cost by the estimator. When both costs are equal the optimal service
/// resolves to UPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Carrier {
    /// United Parcel Service, quoted via the live shipment API.
    #[serde(rename = "UPS")]
    Ups,
    /// United States Postal Service, a derived estimate.
    #[serde(rename = "USPS")]
    Usps,
}

impl Carrier {
    /// Returns the canonical display name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ups => "UPS",
            Self::Usps => "USPS",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
