//! ledgerview - a read-only, cursor-paginated query service over
//! append-only transaction logs
//!
//! Two CSV logs (credits and debits), each ordered by time of
//! occurrence, are merged on demand into globally time-ordered pages.
//! The only state between page fetches is an opaque client-held cursor
//! holding one offset per log.

pub mod cli;
pub mod cursor;
pub mod errors;
pub mod model;
pub mod observability;
pub mod pager;
pub mod query;
pub mod rest_api;
pub mod source;
