//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Numeric Types
//!
//! - [`Cost`]: Non-negative decimal money, rounded to cents
//!
//! ## Domain Types
//!
//! - [`Carrier`]: UPS or USPS
//! - [`Timestamp`]: UTC timestamp wrapper

pub mod carrier;
pub mod money;
pub mod timestamp;

pub use carrier::Carrier;
pub use money::Cost;
pub use timestamp::Timestamp;
