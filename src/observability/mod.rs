//! Structured JSON logging.
//!
//! One log line = one event, written synchronously with deterministic
//! key ordering: `event` first, `severity` second, remaining fields
//! alphabetical.

mod logger;

pub use logger::{Logger, Severity};

/// Logs a normal-operations event.
pub fn info(event: &str, fields: &[(&str, &str)]) {
    Logger::log(Severity::Info, event, fields);
}

/// Logs a recoverable issue, such as a rejected request.
pub fn warn(event: &str, fields: &[(&str, &str)]) {
    Logger::log(Severity::Warn, event, fields);
}

/// Logs an operation failure to stderr.
pub fn error(event: &str, fields: &[(&str, &str)]) {
    Logger::log_stderr(Severity::Error, event, fields);
}
