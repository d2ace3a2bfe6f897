//! # Ship Quote
//!
//! Shipping-quote service: live UPS pricing, a derived USPS estimate, and
//! a bounded-concurrency bulk CSV pipeline over a deduplicating quote
//! cache.
//!
//! # Architecture
//!
//! - [`domain`] - addresses, costs, carriers, and the immutable
//!   [`QuoteRecord`](domain::entities::quote_record::QuoteRecord)
//! - [`application`] - the cache-first
//!   [`QuoteResolver`](application::services::QuoteResolver), the
//!   [`BulkQuoteEngine`](application::services::BulkQuoteEngine) fan-out,
//!   and the error taxonomy
//! - [`infrastructure`] - the UPS client, the quote cache, label storage
//! - [`api`] - the axum REST surface and bulk CSV codec
//! - [`config`] - layered service configuration
//!
//! # Guarantees
//!
//! - A distinct sender/receiver pair hits the carrier API at most once;
//!   every later resolution is served from the cache.
//! - Bulk batches return exactly one result per input row, in input
//!   order; a failing row never disturbs its neighbors.
//! - Every outbound carrier call is bounded by a configured timeout.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
