//! Transaction data model
//!
//! A `Transaction` exists only as a query result: it is constructed by
//! parsing one record from a source log and is immutable afterwards.

mod page;
mod transaction;

pub use page::TransactionPage;
pub use transaction::{is_numeric_id, Transaction, TransactionKind, TIMESTAMP_FORMAT};
