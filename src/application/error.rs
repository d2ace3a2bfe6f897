//! # Application Errors
//!
//! Error types for the quoting pipeline.
//!
//! # Error Hierarchy
//!
//! ```text
//! QuoteError                    - per-row failures, always isolated
//! ├── MissingField              - address sub-field absent
//! ├── Carrier(CarrierError)     - carrier API call failed
//! ├── Repository(RepositoryError) - quote store I/O failed
//! └── Unexpected(String)        - anything else, caught at the row boundary
//!
//! BatchError                    - whole-batch failures, fail fast
//! ├── MissingColumns            - input schema is incomplete
//! ├── Malformed                 - input could not be read at all
//! └── Empty                     - batch produced no rows
//! ```
//!
//! Only [`BatchError`] ever aborts a bulk operation; every [`QuoteError`]
//! is captured in the row it belongs to so the batch always completes.
//!
//! # Examples
//!
//! ```
//! use ship_quote::application::error::QuoteError;
//!
//! let err = QuoteError::missing_field("sender_zip");
//! assert!(err.to_string().contains("sender_zip"));
//! ```

use crate::infrastructure::carriers::error::CarrierError;
use crate::infrastructure::persistence::traits::RepositoryError;
use thiserror::Error;

/// Error type for resolving a single shipment quote.
///
/// These are per-row errors: the bulk engine records them in the row's
/// result and keeps going.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// A required address sub-field is absent or empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Column-style field name, e.g. `sender_zip`.
        field: String,
    },

    /// The carrier API call failed (network, timeout, non-2xx, malformed
    /// or incomplete response).
    #[error("carrier call failed: {0}")]
    Carrier(#[from] CarrierError),

    /// The quote store failed while reading or writing.
    #[error("quote store error: {0}")]
    Repository(#[from] RepositoryError),

    /// A fault outside the modeled taxonomy, caught at the row boundary.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl QuoteError {
    /// Creates a missing-field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Returns true if the failure came from the carrier call.
    #[must_use]
    pub fn is_carrier_error(&self) -> bool {
        matches!(self, Self::Carrier(_))
    }

    /// Returns true if the row itself was invalid.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

/// Result type for single-quote resolution.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Error type for a whole bulk batch.
///
/// The one fail-fast case is schema validation: a batch missing required
/// columns is rejected before any row is processed.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The input is missing one or more required columns.
    #[error("input is missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// The required column names that were absent.
        missing: Vec<String>,
    },

    /// The input could not be read as tabular data.
    #[error("input could not be read: {0}")]
    Malformed(String),

    /// The batch contained no data rows.
    #[error("batch produced no results")]
    Empty,
}

impl BatchError {
    /// Creates a missing-columns error.
    #[must_use]
    pub fn missing_columns(missing: Vec<String>) -> Self {
        Self::MissingColumns { missing }
    }

    /// Creates a malformed-input error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Returns true if the batch was rejected for schema reasons.
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::MissingColumns { .. } | Self::Malformed(_))
    }
}

/// Result type for bulk operations.
pub type BatchResult<T> = Result<T, BatchError>;
