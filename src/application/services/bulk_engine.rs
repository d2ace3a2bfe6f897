//! # Bulk Quote Engine
//!
//! Fans a batch of raw rows out across the resolver under a bounded
//! concurrency limit and folds the results back into an input-ordered
//! report.
//!
//! Row isolation is the engine's contract: a bad address, a carrier
//! failure, even a panicked worker task each mark their own row as an
//! error and leave the rest of the batch untouched. The report always
//! carries exactly one result per submitted row, in submission order.

use crate::application::error::{BatchError, BatchResult, QuoteResult};
use crate::application::services::quote_resolver::{QuoteResolver, ResolvedQuote};
use crate::domain::entities::address::{Address, AddressPair, MissingField};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// Default ceiling on rows resolved concurrently.
pub const DEFAULT_CONCURRENCY: usize = 32;

/// Tunables for a bulk run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulkEngineConfig {
    /// Maximum number of rows in flight at once.
    pub concurrency: usize,
}

impl BulkEngineConfig {
    /// Creates a config with the given concurrency ceiling (minimum 1).
    #[must_use]
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }
}

impl Default for BulkEngineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// One raw input row: the twelve address columns, unvalidated.
///
/// Field names double as the required input column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    /// Sender contact name.
    pub sender_name: String,
    /// Sender phone number.
    pub sender_phone: String,
    /// Sender street address.
    pub sender_addr: String,
    /// Sender city.
    pub sender_city: String,
    /// Sender state code.
    pub sender_state: String,
    /// Sender postal code.
    pub sender_zip: String,
    /// Receiver contact name.
    pub receiver_name: String,
    /// Receiver phone number.
    pub receiver_phone: String,
    /// Receiver street address.
    pub receiver_addr: String,
    /// Receiver city.
    pub receiver_city: String,
    /// Receiver state code.
    pub receiver_state: String,
    /// Receiver postal code.
    pub receiver_zip: String,
}

impl BatchRow {
    /// Validates the row into an [`AddressPair`].
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::MissingField` naming the offending column
    /// (`sender_zip`, `receiver_city`, ...) when a field is empty.
    pub fn address_pair(&self) -> QuoteResult<AddressPair> {
        fn prefixed(prefix: &str, e: MissingField) -> crate::application::error::QuoteError {
            crate::application::error::QuoteError::missing_field(format!("{}_{}", prefix, e.field))
        }

        let sender = Address::new(
            self.sender_name.clone(),
            self.sender_phone.clone(),
            self.sender_addr.clone(),
            self.sender_city.clone(),
            self.sender_state.clone(),
            self.sender_zip.clone(),
        )
        .map_err(|e| prefixed("sender", e))?;

        let receiver = Address::new(
            self.receiver_name.clone(),
            self.receiver_phone.clone(),
            self.receiver_addr.clone(),
            self.receiver_city.clone(),
            self.receiver_state.clone(),
            self.receiver_zip.clone(),
        )
        .map_err(|e| prefixed("receiver", e))?;

        Ok(AddressPair::new(sender, receiver))
    }
}

/// Outcome of one row: a resolved quote or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    /// The row resolved to a quote.
    Success(ResolvedQuote),
    /// The row failed; the batch kept going.
    Error {
        /// Human-readable failure description.
        message: String,
    },
}

impl RowOutcome {
    /// Returns true if the row resolved successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// One row's result, paired with the input that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct RowResult {
    row: BatchRow,
    outcome: RowOutcome,
}

impl RowResult {
    /// Pairs an input row with its outcome.
    #[must_use]
    pub fn new(row: BatchRow, outcome: RowOutcome) -> Self {
        Self { row, outcome }
    }

    /// Returns the input row.
    #[inline]
    #[must_use]
    pub fn row(&self) -> &BatchRow {
        &self.row
    }

    /// Returns the row's outcome.
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> &RowOutcome {
        &self.outcome
    }
}

/// The complete result of a bulk run, in submission order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    rows: Vec<RowResult>,
    successful_count: usize,
    error_count: usize,
}

impl BatchReport {
    /// Builds a report from per-row results, tallying the counts.
    #[must_use]
    pub fn from_rows(rows: Vec<RowResult>) -> Self {
        let successful_count = rows.iter().filter(|r| r.outcome.is_success()).count();
        let error_count = rows.len() - successful_count;
        Self {
            rows,
            successful_count,
            error_count,
        }
    }

    /// Returns the per-row results in submission order.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[RowResult] {
        &self.rows
    }

    /// Returns how many rows resolved successfully.
    #[inline]
    #[must_use]
    pub fn successful_count(&self) -> usize {
        self.successful_count
    }

    /// Returns how many rows failed.
    #[inline]
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Returns the total row count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.len()
    }
}

/// Bounded-concurrency fan-out over the resolver.
#[derive(Debug, Clone)]
pub struct BulkQuoteEngine {
    resolver: QuoteResolver,
    config: BulkEngineConfig,
}

impl BulkQuoteEngine {
    /// Creates an engine over a resolver.
    #[must_use]
    pub fn new(resolver: QuoteResolver, config: BulkEngineConfig) -> Self {
        Self { resolver, config }
    }

    /// Runs a batch and returns the input-ordered report.
    ///
    /// Each row is resolved in its own task; a semaphore caps how many run
    /// at once. Row failures, including worker panics, never abort the
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns `BatchError::Empty` if no rows were submitted. Per-row
    /// failures do not surface here.
    pub async fn run(&self, access_token: &str, rows: Vec<BatchRow>) -> BatchResult<BatchReport> {
        if rows.is_empty() {
            return Err(BatchError::Empty);
        }

        let total = rows.len();
        info!(rows = total, concurrency = self.config.concurrency, "starting bulk run");

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut handles = Vec::with_capacity(total);

        for row in rows {
            // Kept outside the task so a panicked worker still yields a
            // result for its row.
            let fallback = row.clone();
            let semaphore = Arc::clone(&semaphore);
            let resolver = self.resolver.clone();
            let token = access_token.to_owned();

            let handle = tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return RowResult {
                            row,
                            outcome: RowOutcome::Error {
                                message: "concurrency limiter closed".to_owned(),
                            },
                        };
                    }
                };

                let outcome = match row.address_pair() {
                    Ok(pair) => match resolver.resolve(&token, pair).await {
                        Ok(quote) => RowOutcome::Success(quote),
                        Err(e) => RowOutcome::Error {
                            message: e.to_string(),
                        },
                    },
                    Err(e) => RowOutcome::Error {
                        message: e.to_string(),
                    },
                };

                RowResult { row, outcome }
            });

            handles.push((handle, fallback));
        }

        let mut results = Vec::with_capacity(total);

        // Awaiting in submission order keeps the report input-ordered.
        for (handle, fallback) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    error!(error = %e, "bulk worker task failed");
                    RowResult {
                        row: fallback,
                        outcome: RowOutcome::Error {
                            message: format!("worker task failed: {}", e),
                        },
                    }
                }
            };

            results.push(result);
        }

        let report = BatchReport::from_rows(results);
        info!(
            successful = report.successful_count(),
            errors = report.error_count(),
            "bulk run complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::application::services::estimator::{FixedJitter, UspsEstimator};
    use crate::domain::value_objects::{Carrier, Cost};
    use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
    use crate::infrastructure::carriers::traits::{CarrierClient, CarrierQuote};
    use crate::infrastructure::labels::{LabelResult, LabelStore};
    use crate::infrastructure::persistence::in_memory::InMemoryQuoteRepository;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Carrier stub that fails for receivers named `Bad` and tracks its
    /// peak concurrency.
    #[derive(Debug, Default)]
    struct TrackingCarrier {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        delay_ms: u64,
    }

    impl TrackingCarrier {
        fn slow(delay_ms: u64) -> Self {
            Self {
                delay_ms,
                ..Self::default()
            }
        }

        fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CarrierClient for TrackingCarrier {
        fn carrier(&self) -> Carrier {
            Carrier::Ups
        }

        fn timeout_ms(&self) -> u64 {
            1000
        }

        async fn create_shipment(
            &self,
            _access_token: &str,
            pair: &AddressPair,
        ) -> CarrierResult<CarrierQuote> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(current, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if pair.receiver().name() == "Bad" {
                return Err(CarrierError::status(500, "carrier exploded"));
            }
            Ok(CarrierQuote::new(Cost::from_f64(50.0).unwrap(), None, 6))
        }
    }

    #[derive(Debug)]
    struct NullLabels;

    #[async_trait]
    impl LabelStore for NullLabels {
        async fn save(&self, _image_base64: &str) -> LabelResult<String> {
            Ok("http://localhost:8080/labels/label_test.gif".to_owned())
        }
    }

    fn engine_with(carrier: Arc<TrackingCarrier>, concurrency: usize) -> BulkQuoteEngine {
        let resolver = QuoteResolver::new(
            carrier,
            Arc::new(InMemoryQuoteRepository::new()),
            Arc::new(NullLabels),
            UspsEstimator::new(Arc::new(FixedJitter::new(2.0))),
        );
        BulkQuoteEngine::new(resolver, BulkEngineConfig::new(concurrency))
    }

    fn row(receiver_name: &str) -> BatchRow {
        BatchRow {
            sender_name: "Ada".to_owned(),
            sender_phone: "5551234".to_owned(),
            sender_addr: "1 Main St".to_owned(),
            sender_city: "Austin".to_owned(),
            sender_state: "TX".to_owned(),
            sender_zip: "73301".to_owned(),
            receiver_name: receiver_name.to_owned(),
            receiver_phone: "5555678".to_owned(),
            receiver_addr: "2 Oak Ave".to_owned(),
            receiver_city: "Boston".to_owned(),
            receiver_state: "MA".to_owned(),
            receiver_zip: "02101".to_owned(),
        }
    }

    #[test]
    fn row_validation_prefixes_field_names() {
        let mut bad = row("Grace");
        bad.receiver_zip = "  ".to_owned();
        let err = bad.address_pair().unwrap_err();
        assert!(err.to_string().contains("receiver_zip"));

        bad.sender_phone = String::new();
        let err = bad.address_pair().unwrap_err();
        assert!(err.to_string().contains("sender_phone"));
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let engine = engine_with(Arc::new(TrackingCarrier::default()), 4);
        let err = engine.run("token", Vec::new()).await.unwrap_err();
        assert!(matches!(err, BatchError::Empty));
    }

    #[tokio::test]
    async fn failures_are_isolated_per_row() {
        let engine = engine_with(Arc::new(TrackingCarrier::default()), 4);
        let rows = vec![row("Grace"), row("Bad"), row("Alan")];

        let report = engine.run("token", rows).await.unwrap();

        assert_eq!(report.total(), 3);
        assert_eq!(report.successful_count(), 2);
        assert_eq!(report.error_count(), 1);

        // Report order follows submission order.
        assert_eq!(report.rows()[0].row().receiver_name, "Grace");
        assert_eq!(report.rows()[1].row().receiver_name, "Bad");
        assert_eq!(report.rows()[2].row().receiver_name, "Alan");

        assert!(report.rows()[0].outcome().is_success());
        match report.rows()[1].outcome() {
            RowOutcome::Error { message } => assert!(message.contains("carrier")),
            RowOutcome::Success(_) => panic!("expected row error"),
        }
        assert!(report.rows()[2].outcome().is_success());
    }

    #[tokio::test]
    async fn invalid_row_never_reaches_the_carrier() {
        let carrier = Arc::new(TrackingCarrier::default());
        let engine = engine_with(Arc::clone(&carrier), 4);

        let mut bad = row("Grace");
        bad.sender_city = String::new();

        let report = engine.run("token", vec![bad]).await.unwrap();

        assert_eq!(report.error_count(), 1);
        assert_eq!(carrier.peak(), 0);
        match report.rows()[0].outcome() {
            RowOutcome::Error { message } => assert!(message.contains("sender_city")),
            RowOutcome::Success(_) => panic!("expected row error"),
        }
    }

    #[tokio::test]
    async fn concurrency_stays_under_the_ceiling() {
        let carrier = Arc::new(TrackingCarrier::slow(20));
        let engine = engine_with(Arc::clone(&carrier), 2);

        let rows: Vec<BatchRow> = (0..8).map(|i| row(&format!("Receiver{}", i))).collect();
        let report = engine.run("token", rows).await.unwrap();

        assert_eq!(report.successful_count(), 8);
        assert!(carrier.peak() <= 2, "peak concurrency {}", carrier.peak());
    }

    #[tokio::test]
    async fn duplicate_pairs_share_one_resolution() {
        let carrier = Arc::new(TrackingCarrier::default());
        let engine = engine_with(Arc::clone(&carrier), 4);

        let rows = vec![row("Grace"), row("Grace"), row("Grace")];
        let report = engine.run("token", rows).await.unwrap();

        assert_eq!(report.successful_count(), 3);
        let costs: Vec<Cost> = report
            .rows()
            .iter()
            .map(|r| match r.outcome() {
                RowOutcome::Success(quote) => quote.ups_cost(),
                RowOutcome::Error { message } => panic!("unexpected error: {}", message),
            })
            .collect();
        assert!(costs.windows(2).all(|w| w[0] == w[1]));
    }

    proptest! {
        #[test]
        fn report_always_matches_row_count(n in 1usize..=24) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                let engine = engine_with(Arc::new(TrackingCarrier::default()), 4);
                let rows: Vec<BatchRow> =
                    (0..n).map(|i| row(&format!("Receiver{}", i))).collect();

                let report = engine.run("token", rows).await.unwrap();

                prop_assert_eq!(report.total(), n);
                prop_assert_eq!(
                    report.successful_count() + report.error_count(),
                    report.total()
                );
                Ok(())
            })?;
        }
    }
}
