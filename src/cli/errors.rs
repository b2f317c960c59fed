//! CLI error types

use std::io;

use thiserror::Error;

use crate::errors::LedgerError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors raised while loading configuration or running commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable, or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O failure outside the engine (e.g. binding the listen socket)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Output serialization failure
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Engine failure, passed through unchanged
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
