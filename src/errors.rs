//! Error taxonomy for the transaction query engine.
//!
//! One closed error family covers every way a page fetch can fail:
//! - `InvalidQuery`, `InvalidCursor` — caller-correctable input failures
//! - `SchemaError`, `MalformedRecord` — server-side data failures
//! - `SourceUnavailable` — server-side resource failure
//!
//! Every failure aborts the whole request. The engine is read-only, so
//! there is nothing to roll back and nothing is retried internally.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for engine operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors raised by the paginated merge-read engine
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed filter parameters (date order, identifier shape, page size)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Malformed page token
    #[error("Invalid page token: {0}")]
    InvalidCursor(String),

    /// A transaction log is missing a required column
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// A record within the scanned range failed field-level parsing.
    ///
    /// Fatal for the whole page fetch: no partial results, no silent
    /// skipping.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A transaction log could not be opened or read
    #[error("Transaction log unavailable: {path}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LedgerError {
    /// Returns true when the failure is correctable by the caller
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidQuery(_) | LedgerError::InvalidCursor(_)
        )
    }
}
