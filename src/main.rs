//! Service binary: loads configuration, wires the pipeline, serves HTTP.

use anyhow::Context;
use ship_quote::api::rest::{AppState, create_router};
use ship_quote::application::services::bulk_engine::{BulkEngineConfig, BulkQuoteEngine};
use ship_quote::application::services::estimator::{Jitter, ThreadRngJitter, UspsEstimator};
use ship_quote::application::services::quote_resolver::QuoteResolver;
use ship_quote::config::ServiceConfig;
use ship_quote::infrastructure::carriers::ups::{UpsClient, UpsConfig};
use ship_quote::infrastructure::labels::FsLabelStore;
use ship_quote::infrastructure::persistence::in_memory::InMemoryQuoteRepository;
use ship_quote::infrastructure::persistence::traits::QuoteRepository;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::load().context("failed to load configuration")?;

    let jitter: Arc<dyn Jitter> = Arc::new(ThreadRngJitter);
    let carrier = UpsClient::new(
        UpsConfig {
            base_url: config.carrier.base_url.clone(),
            timeout_ms: config.carrier.timeout_ms,
            shipper_number: config.carrier.shipper_number.clone(),
            account_number: config.carrier.account_number.clone(),
        },
        Arc::clone(&jitter),
    )
    .context("failed to build carrier client")?;

    let repository: Arc<dyn QuoteRepository> = Arc::new(InMemoryQuoteRepository::new());
    let labels = Arc::new(FsLabelStore::new(
        &config.labels.dir,
        &config.labels.public_base_url,
    ));

    let resolver = QuoteResolver::new(
        Arc::new(carrier),
        Arc::clone(&repository),
        labels,
        UspsEstimator::new(jitter),
    );
    let engine = BulkQuoteEngine::new(
        resolver.clone(),
        BulkEngineConfig::new(config.bulk.concurrency),
    );

    let router = create_router(AppState {
        resolver,
        engine,
        repository,
    });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(addr = %addr, "ship-quote listening");
    axum::serve(listener, router)
        .await
        .context("server exited with error")?;

    Ok(())
}
