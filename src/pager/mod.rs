//! Page merger: drives both record sources for one page, merges the
//! matched streams into a single time-ordered page, decides
//! continuation and recomputes the cursor.
//!
//! The merger itself is stateless per call. The only state threaded
//! between calls is the opaque cursor held by the client; each request
//! is a fresh computation against current on-disk content.

use std::path::PathBuf;

use crate::cursor::PageCursor;
use crate::errors::LedgerResult;
use crate::model::{TransactionKind, TransactionPage};
use crate::query::TransactionQuery;
use crate::source::RecordSource;

/// Default maximum number of transactions per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Engine configuration, passed explicitly at construction.
///
/// No process-wide mutable state: the merger owns everything it needs.
#[derive(Debug, Clone)]
pub struct PagerConfig {
    /// Path to the credit transaction log
    pub credits_file: PathBuf,
    /// Path to the debit transaction log
    pub debits_file: PathBuf,
    /// Maximum transactions returned per call
    pub page_size: usize,
}

/// Produces one `TransactionPage` per validated query
#[derive(Debug)]
pub struct PageMerger {
    credits: RecordSource,
    debits: RecordSource,
    page_size: usize,
}

impl PageMerger {
    pub fn new(config: PagerConfig) -> Self {
        Self {
            credits: RecordSource::new(config.credits_file, TransactionKind::Credit),
            debits: RecordSource::new(config.debits_file, TransactionKind::Debit),
            page_size: config.page_size,
        }
    }

    /// Fetches one page for a validated query.
    ///
    /// Both sources are scanned independently, each requesting up to a
    /// full page of matches from its own offset. The matched streams
    /// are concatenated and stably sorted by timestamp, so ties keep
    /// credit-before-debit, file-order within a source. Any scan or
    /// parse failure aborts the whole fetch with no partial page.
    pub fn fetch_page(
        &self,
        query: &TransactionQuery,
        page_token: Option<&str>,
    ) -> LedgerResult<TransactionPage> {
        let cursor = PageCursor::decode(page_token)?;

        let mut credit_scan = self.credits.scan(cursor.credit_offset, self.page_size, query)?;
        let mut debit_scan = self.debits.scan(cursor.debit_offset, self.page_size, query)?;

        let mut transactions = std::mem::take(&mut credit_scan.matched);
        transactions.append(&mut debit_scan.matched);
        transactions.sort_by_key(|txn| txn.timestamp);

        let truncated = transactions.len() > self.page_size;
        if truncated {
            transactions.truncate(self.page_size);
        }

        // Each source's new offset covers exactly the records consumed
        // into the delivered page. Matches dropped by truncation stay
        // beyond their source's offset and reappear on the next page.
        let returned_credits = transactions
            .iter()
            .filter(|txn| txn.kind == TransactionKind::Credit)
            .count();
        let returned_debits = transactions.len() - returned_credits;
        let next_cursor = PageCursor {
            credit_offset: credit_scan.advance_for(returned_credits, cursor.credit_offset),
            debit_offset: debit_scan.advance_for(returned_debits, cursor.debit_offset),
        };

        let has_more = truncated
            || self.credits.has_more(next_cursor.credit_offset)?
            || self.debits.has_more(next_cursor.debit_offset)?;

        let next_page_token = if has_more {
            Some(next_cursor.encode())
        } else {
            None
        };

        Ok(TransactionPage {
            transactions,
            has_more,
            next_page_token,
        })
    }

    /// Configured page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;
    use crate::errors::LedgerError;
    use crate::model::TIMESTAMP_FORMAT;

    const HEADER: &str = "TRANSACTION_ID,CUSTOMER_ID,ACCOUNT_ID,AMOUNT,DATE_TIME";

    fn write_log(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        path
    }

    /// Two logs of 3 records each: credits at 10:00-12:00, debits at
    /// 15:00-17:00, across 2023-01-01..03. Account 100 holds 4 of the
    /// 6 records.
    fn merger(dir: &TempDir, page_size: usize) -> PageMerger {
        let credits_file = write_log(
            dir,
            "credits.csv",
            &[
                "1,10,100,5.00,2023-01-01T10:00:00",
                "2,10,200,6.00,2023-01-02T11:00:00",
                "3,11,100,7.00,2023-01-03T12:00:00",
            ],
        );
        let debits_file = write_log(
            dir,
            "debits.csv",
            &[
                "4,10,100,1.00,2023-01-01T15:00:00",
                "5,10,200,2.00,2023-01-02T16:00:00",
                "6,11,100,3.00,2023-01-03T17:00:00",
            ],
        );
        PageMerger::new(PagerConfig {
            credits_file,
            debits_file,
            page_size,
        })
    }

    fn timestamps(page: &TransactionPage) -> Vec<String> {
        page.transactions
            .iter()
            .map(|t| t.timestamp.format(TIMESTAMP_FORMAT).to_string())
            .collect()
    }

    #[test]
    fn test_single_page_merges_time_ordered() {
        let dir = TempDir::new().unwrap();
        let merger = merger(&dir, 20);

        let page = merger
            .fetch_page(&TransactionQuery::unfiltered(), None)
            .unwrap();

        assert_eq!(page.transactions.len(), 6);
        assert!(!page.has_more);
        assert!(page.next_page_token.is_none());
        assert_eq!(
            timestamps(&page),
            vec![
                "2023-01-01T10:00:00",
                "2023-01-01T15:00:00",
                "2023-01-02T11:00:00",
                "2023-01-02T16:00:00",
                "2023-01-03T12:00:00",
                "2023-01-03T17:00:00",
            ]
        );
    }

    #[test]
    fn test_account_filter_paginates_and_resumes() {
        let dir = TempDir::new().unwrap();
        let merger = merger(&dir, 3);
        let query = TransactionQuery::new(Some("100".to_string()), None, None).unwrap();

        let first = merger.fetch_page(&query, None).unwrap();
        assert_eq!(first.transactions.len(), 3);
        assert!(first.has_more);
        let token = first.next_page_token.clone().unwrap();

        let second = merger.fetch_page(&query, Some(&token)).unwrap();
        assert!(!second.has_more);
        assert!(second.next_page_token.is_none());

        let mut seen: Vec<String> = first
            .transactions
            .iter()
            .chain(second.transactions.iter())
            .map(|t| t.transaction_id.clone())
            .collect();
        seen.sort();
        seen.dedup();
        // All four account-100 records, no duplicates, none skipped
        assert_eq!(seen, vec!["1", "3", "4", "6"]);
        for txn in first.transactions.iter().chain(second.transactions.iter()) {
            assert_eq!(txn.account_id, "100");
        }
    }

    #[test]
    fn test_date_range_filter() {
        let dir = TempDir::new().unwrap();
        let merger = merger(&dir, 20);
        let query = TransactionQuery::new(
            None,
            Some(
                chrono::NaiveDateTime::parse_from_str("2023-01-02T00:00:00", TIMESTAMP_FORMAT)
                    .unwrap(),
            ),
            Some(
                chrono::NaiveDateTime::parse_from_str("2023-01-02T23:59:59", TIMESTAMP_FORMAT)
                    .unwrap(),
            ),
        )
        .unwrap();

        let page = merger.fetch_page(&query, None).unwrap();

        assert_eq!(page.transactions.len(), 2);
        let ids: Vec<&str> = page
            .transactions
            .iter()
            .map(|t| t.transaction_id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "5"]);
    }

    #[test]
    fn test_truncation_sets_continuation() {
        let dir = TempDir::new().unwrap();
        let merger = merger(&dir, 4);

        let page = merger
            .fetch_page(&TransactionQuery::unfiltered(), None)
            .unwrap();

        assert_eq!(page.transactions.len(), 4);
        assert!(page.has_more);
        assert!(page.next_page_token.is_some());
    }

    #[test]
    fn test_result_never_exceeds_page_size() {
        let dir = TempDir::new().unwrap();
        let merger = merger(&dir, 2);

        let mut token: Option<String> = None;
        let mut all: Vec<_> = Vec::new();
        loop {
            let page = merger
                .fetch_page(&TransactionQuery::unfiltered(), token.as_deref())
                .unwrap();
            assert!(page.transactions.len() <= 2);
            all.extend(page.transactions);
            match page.next_page_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        // Every record delivered exactly once, globally time-ordered
        assert_eq!(all.len(), 6);
        for pair in all.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        let mut ids: Vec<&str> = all.iter().map(|t| t.transaction_id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_invalid_cursor_propagates() {
        let dir = TempDir::new().unwrap();
        let merger = merger(&dir, 20);

        let result = merger.fetch_page(&TransactionQuery::unfiltered(), Some("not-a-cursor"));
        assert!(matches!(result, Err(LedgerError::InvalidCursor(_))));
    }

    #[test]
    fn test_malformed_record_aborts_whole_fetch() {
        let dir = TempDir::new().unwrap();
        let credits_file = write_log(&dir, "credits.csv", &["1,10,100,5.00,2023-01-01T10:00:00"]);
        let debits_file = write_log(&dir, "debits.csv", &["2,10,100,-5.00,2023-01-01T15:00:00"]);
        let merger = PageMerger::new(PagerConfig {
            credits_file,
            debits_file,
            page_size: 20,
        });

        // No transactions from either source, even though credits parse
        let result = merger.fetch_page(&TransactionQuery::unfiltered(), None);
        assert!(matches!(result, Err(LedgerError::MalformedRecord(_))));
    }

    #[test]
    fn test_missing_amount_column_fails_with_schema_error() {
        let dir = TempDir::new().unwrap();
        let credits_file = write_log(&dir, "credits.csv", &["1,10,100,5.00,2023-01-01T10:00:00"]);
        let debits_file = dir.path().join("debits.csv");
        let mut file = File::create(&debits_file).unwrap();
        writeln!(file, "TRANSACTION_ID,CUSTOMER_ID,ACCOUNT_ID,DATE_TIME").unwrap();
        writeln!(file, "2,10,100,2023-01-01T15:00:00").unwrap();
        let merger = PageMerger::new(PagerConfig {
            credits_file,
            debits_file,
            page_size: 20,
        });

        let result = merger.fetch_page(&TransactionQuery::unfiltered(), None);
        assert!(matches!(result, Err(LedgerError::SchemaError(_))));
    }

    #[test]
    fn test_empty_logs_yield_empty_final_page() {
        let dir = TempDir::new().unwrap();
        let credits_file = write_log(&dir, "credits.csv", &[]);
        let debits_file = write_log(&dir, "debits.csv", &[]);
        let merger = PageMerger::new(PagerConfig {
            credits_file,
            debits_file,
            page_size: 20,
        });

        let page = merger
            .fetch_page(&TransactionQuery::unfiltered(), None)
            .unwrap();
        assert!(page.transactions.is_empty());
        assert!(!page.has_more);
        assert!(page.next_page_token.is_none());
    }
}
