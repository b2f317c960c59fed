//! Sequential scanning over one ordered transaction log.
//!
//! A scan visits every record in file order: records below the start
//! offset are skipped without field-level inspection, everything at or
//! beyond it is fully parsed and matched against the filter. Scanning
//! stops as soon as the match limit is reached or the log is exhausted.
//!
//! Offsets count records, not bytes. `records_advanced` reports the
//! total number of records the scan moved past (offset skip plus every
//! scanned record) so the caller can persist it as the new offset and
//! resume without re-seeing or skipping records, even under filters
//! that exclude records.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::errors::{LedgerError, LedgerResult};
use crate::model::{Transaction, TransactionKind};
use crate::query::TransactionQuery;

use super::record::RecordLayout;

/// Result of one bounded scan over a source log
#[derive(Debug)]
pub struct ScanOutcome {
    /// Records that satisfied the filter, in file (time) order
    pub matched: Vec<Transaction>,
    /// Total records consumed from record index 0, matched or not.
    ///
    /// The caller persists this as the source's new offset when every
    /// matched record was delivered.
    pub records_advanced: u64,
    /// File position just after consuming each matched record
    match_advances: Vec<u64>,
}

impl ScanOutcome {
    /// Offset to persist when only the first `returned` matched
    /// records made it into the delivered page.
    ///
    /// Covers every record consumed up to and including the last
    /// delivered match; undelivered matches stay beyond the offset and
    /// are re-scanned by the next page, so truncation never loses or
    /// duplicates a record.
    pub fn advance_for(&self, returned: usize, start_offset: u64) -> u64 {
        if returned >= self.match_advances.len() {
            self.records_advanced
        } else if returned == 0 {
            start_offset
        } else {
            self.match_advances[returned - 1]
        }
    }
}

/// Read access to one ordered log of a single transaction kind
#[derive(Debug, Clone)]
pub struct RecordSource {
    path: PathBuf,
    kind: TransactionKind,
}

impl RecordSource {
    pub fn new(path: impl Into<PathBuf>, kind: TransactionKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Returns the log path this source is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scans the log for up to `limit` records matching `query`,
    /// starting logically at record index `start_offset`.
    ///
    /// The header is validated before any row is trusted
    /// (`SchemaError` on a missing column). Any record at or beyond
    /// `start_offset` that fails parsing aborts the whole scan with
    /// `MalformedRecord` — no silent skipping.
    pub fn scan(
        &self,
        start_offset: u64,
        limit: usize,
        query: &TransactionQuery,
    ) -> LedgerResult<ScanOutcome> {
        if limit == 0 {
            return Err(LedgerError::InvalidQuery(
                "scan limit must be positive".to_string(),
            ));
        }

        let mut reader = self.open_reader()?;
        let layout = self.validate_header(&mut reader)?;

        let mut matched = Vec::new();
        let mut match_advances = Vec::new();
        let mut position: u64 = 0;

        for row in reader.records() {
            let row = row.map_err(|e| {
                LedgerError::MalformedRecord(format!(
                    "unreadable record in {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

            // Skip-range records are counted but never inspected
            if position < start_offset {
                position += 1;
                continue;
            }

            let txn = layout.parse_row(&row, self.kind)?;
            position += 1;

            if query.matches(&txn) {
                matched.push(txn);
                match_advances.push(position);
                if matched.len() >= limit {
                    break;
                }
            }
        }

        Ok(ScanOutcome {
            matched,
            records_advanced: position,
            match_advances,
        })
    }

    /// Returns true iff the log contains at least one data record
    /// beyond `offset`. The header row is excluded from the count.
    ///
    /// A missing log has no records beyond any offset. A trailing
    /// record that cannot be tokenized (e.g. a partially appended line)
    /// is treated as not yet present.
    pub fn has_more(&self, offset: u64) -> LedgerResult<bool> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(LedgerError::SourceUnavailable {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let mut reader = csv_reader(file);
        let mut count: u64 = 0;
        for row in reader.records() {
            if row.is_err() {
                break;
            }
            count += 1;
            if count > offset {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn open_reader(&self) -> LedgerResult<csv::Reader<File>> {
        let file = File::open(&self.path).map_err(|e| LedgerError::SourceUnavailable {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(csv_reader(file))
    }

    fn validate_header(
        &self,
        reader: &mut csv::Reader<File>,
    ) -> LedgerResult<RecordLayout> {
        let headers = reader.headers().map_err(|e| {
            LedgerError::SchemaError(format!(
                "unreadable header in {}: {}",
                self.path.display(),
                e
            ))
        })?;
        RecordLayout::from_headers(headers)
    }
}

fn csv_reader(file: File) -> csv::Reader<File> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file)
}
