//! # In-Memory Quote Repository
//!
//! In-memory implementation of [`QuoteRepository`].
//!
//! Thread-safe `HashMap` keyed by address pair. This is the default cache
//! backend for the service as well as for tests; nothing in the resolver
//! depends on durability.

use crate::domain::entities::address::AddressPair;
use crate::domain::entities::quote_record::QuoteRecord;
use crate::infrastructure::persistence::traits::{QuoteRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`QuoteRepository`].
///
/// First writer wins: an insert for a pair that already has a record is a
/// no-op reported as `false`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuoteRepository {
    storage: Arc<RwLock<HashMap<AddressPair, QuoteRecord>>>,
}

impl InMemoryQuoteRepository {
    /// Creates a new empty in-memory quote repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of cached quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all cached quotes.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn find(&self, pair: &AddressPair) -> RepositoryResult<Option<QuoteRecord>> {
        let storage = self.storage.read().await;
        Ok(storage.get(pair).cloned())
    }

    async fn insert(&self, record: &QuoteRecord) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        if storage.contains_key(record.pair()) {
            return Ok(false);
        }
        storage.insert(record.pair().clone(), record.clone());
        Ok(true)
    }

    async fn list(&self) -> RepositoryResult<Vec<QuoteRecord>> {
        let storage = self.storage.read().await;
        Ok(storage.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::address::Address;
    use crate::domain::value_objects::Cost;

    fn test_pair(receiver_name: &str) -> AddressPair {
        let sender = Address::new("Ada", "5551234", "1 Main St", "Austin", "TX", "73301").unwrap();
        let receiver =
            Address::new(receiver_name, "5555678", "2 Oak Ave", "Boston", "MA", "02101").unwrap();
        AddressPair::new(sender, receiver)
    }

    fn test_record(receiver_name: &str, ups_cost: f64) -> QuoteRecord {
        QuoteRecord::new(
            test_pair(receiver_name),
            Cost::from_f64(ups_cost).unwrap(),
            Cost::from_f64(ups_cost + 3.0).unwrap(),
            6,
            7,
            None,
        )
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryQuoteRepository::new();
        assert!(repo.is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_and_find() {
        let repo = InMemoryQuoteRepository::new();
        let record = test_record("Grace", 50.0);

        assert!(repo.insert(&record).await.unwrap());

        let found = repo.find(record.pair()).await.unwrap().unwrap();
        assert_eq!(found.ups_cost(), record.ups_cost());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_miss_returns_none() {
        let repo = InMemoryQuoteRepository::new();
        assert!(repo.find(&test_pair("Grace")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn first_writer_wins() {
        let repo = InMemoryQuoteRepository::new();
        let first = test_record("Grace", 50.0);
        let second = test_record("Grace", 99.0);

        assert!(repo.insert(&first).await.unwrap());
        assert!(!repo.insert(&second).await.unwrap());

        let found = repo.find(first.pair()).await.unwrap().unwrap();
        assert_eq!(found.ups_cost(), Cost::from_f64(50.0).unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_and_clear() {
        let repo = InMemoryQuoteRepository::new();
        repo.insert(&test_record("Grace", 50.0)).await.unwrap();
        repo.insert(&test_record("Alan", 60.0)).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 2);

        repo.clear().await;
        assert!(repo.is_empty());
    }
}
