//! # Repository Traits
//!
//! Port definitions for quote persistence.
//!
//! The quote cache sits behind [`QuoteRepository`] so the resolver never
//! knows which backend holds resolved quotes. The in-memory implementation
//! is the default; a durable backend slots in behind the same trait.
//!
//! # Examples
//!
//! ```ignore
//! use ship_quote::infrastructure::persistence::traits::QuoteRepository;
//!
//! async fn cached(repo: &impl QuoteRepository, pair: &AddressPair) -> bool {
//!     repo.find(pair).await.unwrap().is_some()
//! }
//! ```

use crate::domain::entities::address::AddressPair;
use crate::domain::entities::quote_record::QuoteRecord;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Quote not found.
    #[error("quote not found for pair {pair}")]
    NotFound {
        /// The address pair that had no cached quote.
        pair: String,
    },

    /// Connection error.
    #[error("repository connection error: {0}")]
    Connection(String),

    /// Serialization error.
    #[error("repository serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("repository internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(pair: impl Into<String>) -> Self {
        Self::NotFound { pair: pair.into() }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for resolved quote records, keyed by address pair.
///
/// The cache is append-once per pair: `insert` keeps the first record and
/// reports whether the write won, so concurrent resolvers for the same
/// pair converge on one stored quote.
#[async_trait]
pub trait QuoteRepository: Send + Sync + fmt::Debug {
    /// Finds the cached quote for an address pair.
    ///
    /// Returns `None` on a cache miss.
    async fn find(&self, pair: &AddressPair) -> RepositoryResult<Option<QuoteRecord>>;

    /// Inserts a quote record unless one already exists for its pair.
    ///
    /// Returns `Ok(true)` if the record was stored, `Ok(false)` if an
    /// earlier record for the same pair already won.
    async fn insert(&self, record: &QuoteRecord) -> RepositoryResult<bool>;

    /// Lists all cached quote records.
    async fn list(&self) -> RepositoryResult<Vec<QuoteRecord>>;

    /// Counts cached quote records.
    async fn count(&self) -> RepositoryResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error() {
        let err = RepositoryError::not_found("Ada -> Grace");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("Ada -> Grace"));
    }

    #[test]
    fn connection_error() {
        let err = RepositoryError::connection("connection refused");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn internal_error() {
        let err = RepositoryError::internal("lock poisoned");
        assert!(err.to_string().contains("lock poisoned"));
    }
}
