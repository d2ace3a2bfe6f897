//! # Domain Entities
//!
//! Core business concepts of the quoting pipeline.
//!
//! - [`Address`] / [`AddressPair`]: shipment endpoints and the cache key
//! - [`QuoteRecord`]: the persisted, immutable result of one resolution

pub mod address;
pub mod quote_record;

pub use address::{Address, AddressPair, MissingField};
pub use quote_record::QuoteRecord;
