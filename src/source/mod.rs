//! Record sources: sequential, offset-addressable read access to one
//! ordered transaction log.
//!
//! One `RecordSource` instance exists per transaction kind. Scanning is
//! strict: the header is validated before any row is trusted, and any
//! record that fails field-level parsing aborts the whole page fetch.

mod reader;
mod record;

pub use reader::{RecordSource, ScanOutcome};
pub use record::RecordLayout;
