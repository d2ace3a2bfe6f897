//! # Carrier Integrations
//!
//! Live carrier clients behind the [`CarrierClient`](traits::CarrierClient)
//! port. UPS is the one live integration; the USPS figure is derived from
//! it by the estimator in the application layer.

pub mod error;
pub mod http_client;
pub mod traits;
pub mod ups;

pub use error::{CarrierError, CarrierResult};
pub use traits::{CarrierClient, CarrierQuote};
pub use ups::{UpsClient, UpsConfig};
