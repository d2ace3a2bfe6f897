//! # Persistence Layer
//!
//! The quote cache behind the [`QuoteRepository`] port.
//!
//! ## Implementations
//!
//! - `in_memory`: thread-safe `HashMap` cache, the default backend

pub mod in_memory;
pub mod traits;

pub use in_memory::InMemoryQuoteRepository;
pub use traits::{QuoteRepository, RepositoryError, RepositoryResult};
