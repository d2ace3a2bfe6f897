//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`QuoteResolver`]: cache-first single-pair resolution
//! - [`BulkQuoteEngine`]: bounded-concurrency batch fan-out
//! - [`UspsEstimator`]: USPS figures derived from the live UPS cost

pub mod bulk_engine;
pub mod estimator;
pub mod quote_resolver;

pub use bulk_engine::{
    BatchReport, BatchRow, BulkEngineConfig, BulkQuoteEngine, RowOutcome, RowResult,
};
pub use estimator::{FixedJitter, Jitter, ThreadRngJitter, UspsEstimate, UspsEstimator};
pub use quote_resolver::{QuoteResolver, ResolvedQuote};
