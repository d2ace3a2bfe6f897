//! # Application Layer
//!
//! Use-case orchestration: quote resolution, bulk fan-out, and the error
//! taxonomy that keeps row failures inside their rows.

pub mod error;
pub mod services;

pub use error::{BatchError, BatchResult, QuoteError, QuoteResult};
