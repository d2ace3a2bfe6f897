//! # Quote Resolver
//!
//! Resolves one address pair to a two-carrier quote, cache first.
//!
//! The resolver is the single path through which quotes come into
//! existence. A cache hit short-circuits everything; a miss takes a
//! per-pair gate so that concurrent misses for the same pair produce
//! exactly one carrier call, then creates the shipment, derives the USPS
//! estimate, stores the label best-effort, and persists the record.
//!
//! Whatever state the cache is in, two resolutions of the same pair
//! return the same costs.

use crate::application::error::{QuoteError, QuoteResult};
use crate::application::services::estimator::UspsEstimator;
use crate::domain::entities::address::AddressPair;
use crate::domain::entities::quote_record::QuoteRecord;
use crate::domain::value_objects::{Carrier, Cost};
use crate::infrastructure::carriers::traits::CarrierClient;
use crate::infrastructure::labels::LabelStore;
use crate::infrastructure::persistence::traits::QuoteRepository;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// A fully resolved quote, ready to serialize toward the caller.
///
/// Flattens a [`QuoteRecord`] and adds the optimal-service verdict plus
/// cache provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedQuote {
    /// Live UPS charge.
    ups_cost: Cost,
    /// Derived USPS estimate.
    usps_cost: Cost,
    /// Estimated UPS transit time in days.
    ups_days: u32,
    /// Estimated USPS transit time in days.
    usps_days: u32,
    /// Retrievable label URL, when the label was persisted.
    label_url: Option<String>,
    /// The cheaper of the two services.
    optimal_service: Carrier,
    /// The cheaper cost.
    optimal_cost: Cost,
    /// True when the quote was served from the cache.
    from_cache: bool,
}

impl ResolvedQuote {
    /// Builds a resolved quote from a stored record.
    #[must_use]
    pub fn from_record(record: &QuoteRecord, from_cache: bool) -> Self {
        let (optimal_service, optimal_cost) = record.optimal();
        Self {
            ups_cost: record.ups_cost(),
            usps_cost: record.usps_cost(),
            ups_days: record.ups_days(),
            usps_days: record.usps_days(),
            label_url: record.label_url().map(str::to_owned),
            optimal_service,
            optimal_cost,
            from_cache,
        }
    }

    /// Returns the UPS charge.
    #[inline]
    #[must_use]
    pub fn ups_cost(&self) -> Cost {
        self.ups_cost
    }

    /// Returns the USPS estimate.
    #[inline]
    #[must_use]
    pub fn usps_cost(&self) -> Cost {
        self.usps_cost
    }

    /// Returns the UPS transit days.
    #[inline]
    #[must_use]
    pub fn ups_days(&self) -> u32 {
        self.ups_days
    }

    /// Returns the USPS transit days.
    #[inline]
    #[must_use]
    pub fn usps_days(&self) -> u32 {
        self.usps_days
    }

    /// Returns the label URL, if a label was persisted.
    #[inline]
    #[must_use]
    pub fn label_url(&self) -> Option<&str> {
        self.label_url.as_deref()
    }

    /// Returns the cheaper service.
    #[inline]
    #[must_use]
    pub fn optimal_service(&self) -> Carrier {
        self.optimal_service
    }

    /// Returns the cheaper cost.
    #[inline]
    #[must_use]
    pub fn optimal_cost(&self) -> Cost {
        self.optimal_cost
    }

    /// Returns true if this quote was served from the cache.
    #[inline]
    #[must_use]
    pub fn from_cache(&self) -> bool {
        self.from_cache
    }
}

/// Cache-first quote resolution service.
#[derive(Debug, Clone)]
pub struct QuoteResolver {
    carrier: Arc<dyn CarrierClient>,
    repository: Arc<dyn QuoteRepository>,
    labels: Arc<dyn LabelStore>,
    estimator: UspsEstimator,
    inflight: Arc<DashMap<AddressPair, Arc<Mutex<()>>>>,
}

impl QuoteResolver {
    /// Creates a resolver over the given ports.
    #[must_use]
    pub fn new(
        carrier: Arc<dyn CarrierClient>,
        repository: Arc<dyn QuoteRepository>,
        labels: Arc<dyn LabelStore>,
        estimator: UspsEstimator,
    ) -> Self {
        Self {
            carrier,
            repository,
            labels,
            estimator,
            inflight: Arc::new(DashMap::new()),
        }
    }

    /// Resolves a quote for an address pair.
    ///
    /// Serves the cached record when one exists. On a miss, exactly one
    /// concurrent caller per pair reaches the carrier; the rest wait on
    /// the per-pair gate and read the record it stored.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::Carrier` when the shipment call fails and
    /// `QuoteError::Repository` on cache failures. Label storage failures
    /// are logged, not propagated.
    pub async fn resolve(
        &self,
        access_token: &str,
        pair: AddressPair,
    ) -> QuoteResult<ResolvedQuote> {
        if let Some(record) = self.repository.find(&pair).await? {
            debug!(pair = %pair, "quote served from cache");
            return Ok(ResolvedQuote::from_record(&record, true));
        }

        // Clone the gate out before awaiting; holding a dashmap entry
        // across an await point would pin its shard lock.
        let gate = {
            let entry = self
                .inflight
                .entry(pair.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())));
            Arc::clone(entry.value())
        };

        let result = {
            let _guard = gate.lock().await;
            self.resolve_gated(access_token, &pair).await
        };

        self.inflight.remove(&pair);
        result
    }

    /// Resolution body run under the per-pair gate.
    async fn resolve_gated(
        &self,
        access_token: &str,
        pair: &AddressPair,
    ) -> QuoteResult<ResolvedQuote> {
        // A concurrent caller may have resolved the pair while this one
        // waited on the gate.
        if let Some(record) = self.repository.find(pair).await? {
            debug!(pair = %pair, "quote resolved by concurrent caller");
            return Ok(ResolvedQuote::from_record(&record, true));
        }

        let quote = self.carrier.create_shipment(access_token, pair).await?;
        let estimate = self.estimator.estimate(quote.total_cost());

        let ups_cost = quote.total_cost();
        let ups_days = quote.transit_days();
        let label_url = match quote.into_label_image() {
            Some(image) => match self.labels.save(&image).await {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(pair = %pair, error = %e, "label storage failed, quoting without label");
                    None
                }
            },
            None => None,
        };

        let record = QuoteRecord::new(
            pair.clone(),
            ups_cost,
            estimate.cost(),
            ups_days,
            estimate.transit_days(),
            label_url,
        );

        if self.repository.insert(&record).await? {
            info!(pair = %pair, ups = %record.ups_cost(), usps = %record.usps_cost(), "quote resolved");
            return Ok(ResolvedQuote::from_record(&record, false));
        }

        // Lost the write race to another process; the stored record wins.
        match self.repository.find(pair).await? {
            Some(winner) => Ok(ResolvedQuote::from_record(&winner, true)),
            None => Err(QuoteError::unexpected(
                "quote record vanished after insert conflict",
            )),
        }
    }
}
