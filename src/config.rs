//! # Service Configuration
//!
//! Layered settings: defaults, an optional `ship-quote.toml` file, then
//! `SHIP_QUOTE`-prefixed environment overrides (`__` path separator, e.g.
//! `SHIP_QUOTE__CARRIER__TIMEOUT_MS=5000`).

use crate::application::services::bulk_engine::DEFAULT_CONCURRENCY;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Carrier API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierConfig {
    /// Carrier API base URL.
    #[serde(default = "default_carrier_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_carrier_timeout_ms")]
    pub timeout_ms: u64,
    /// Shipper account number placed on shipments.
    #[serde(default)]
    pub shipper_number: String,
    /// Billing account number.
    #[serde(default)]
    pub account_number: String,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            base_url: default_carrier_base_url(),
            timeout_ms: default_carrier_timeout_ms(),
            shipper_number: String::new(),
            account_number: String::new(),
        }
    }
}

/// Bulk engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Maximum rows resolved concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

/// Label storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// Directory label files are written to.
    #[serde(default = "default_labels_dir")]
    pub dir: String,
    /// Public URL base the files are served under.
    #[serde(default = "default_labels_base_url")]
    pub public_base_url: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            dir: default_labels_dir(),
            public_base_url: default_labels_base_url(),
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Carrier API settings.
    #[serde(default)]
    pub carrier: CarrierConfig,
    /// Bulk engine settings.
    #[serde(default)]
    pub bulk: BulkConfig,
    /// Label storage settings.
    #[serde(default)]
    pub labels: LabelsConfig,
}

impl ServiceConfig {
    /// Loads configuration from `ship-quote.toml` (optional) and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a `config::ConfigError` when a source cannot be read or a
    /// value fails to deserialize.
    pub fn load() -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(File::with_name("ship-quote").required(false))
            .add_source(Environment::with_prefix("SHIP_QUOTE").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Returns the address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    8080
}

fn default_carrier_base_url() -> String {
    "https://onlinetools.ups.com".to_owned()
}

fn default_carrier_timeout_ms() -> u64 {
    10_000
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_labels_dir() -> String {
    "media/shipping_labels".to_owned()
}

fn default_labels_base_url() -> String {
    "http://localhost:8080/media/shipping_labels".to_owned()
}
