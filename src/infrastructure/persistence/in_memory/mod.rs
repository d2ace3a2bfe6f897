//! # In-Memory Repositories
//!
//! In-memory implementations of the persistence ports.
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<HashMap>>` for thread-safe access.

pub mod quote_repository;

pub use quote_repository::InMemoryQuoteRepository;
