//! HTTP surface for the transaction query engine.
//!
//! One endpoint: `GET /api/transactions` with optional `accountId`,
//! `fromDate`, `toDate` and `pageToken` query parameters. The handlers
//! are thin wrappers: all semantics live in the pager and below.

mod params;
mod response;
mod server;

pub use params::TransactionParams;
pub use response::ErrorBody;
pub use server::{router, serve};
