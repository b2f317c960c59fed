//! Transaction entity and its invariants.
//!
//! Invariants (enforced at parse time by the record source):
//! - all three identifiers match `^[0-9]+$`
//! - amount is strictly positive
//! - timestamp is a local date-time with no zone offset

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// Fixed literal timestamp pattern, e.g. `2023-01-01T10:00:00`.
///
/// No zone suffix, no fractional seconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Which source log a transaction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Credit,
    Debit,
}

/// One transaction record, as read from a source log
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    pub customer_id: String,
    pub account_id: String,
    pub amount: Decimal,
    #[serde(rename = "dateTime")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Returns true iff `id` is a non-empty all-digits identifier
pub fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}
