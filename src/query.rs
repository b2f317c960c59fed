//! Query filter validation and matching.
//!
//! Validation happens before any I/O. Cursor token syntax is the cursor
//! codec's responsibility, not the validator's.

use chrono::NaiveDateTime;

use crate::errors::{LedgerError, LedgerResult};
use crate::model::{is_numeric_id, Transaction};

/// Normalized filter parameters for one page fetch.
///
/// Construct through [`TransactionQuery::new`]; an empty account id is
/// normalized to no account filter.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub account_id: Option<String>,
    pub from_date: Option<NaiveDateTime>,
    pub to_date: Option<NaiveDateTime>,
}

impl TransactionQuery {
    /// Validates caller-supplied filter parameters.
    ///
    /// Fails with `InvalidQuery` when both dates are present and
    /// `from_date` is strictly after `to_date`, or when a non-empty
    /// account id is not all digits.
    pub fn new(
        account_id: Option<String>,
        from_date: Option<NaiveDateTime>,
        to_date: Option<NaiveDateTime>,
    ) -> LedgerResult<Self> {
        if let (Some(from), Some(to)) = (from_date, to_date) {
            if from > to {
                return Err(LedgerError::InvalidQuery(
                    "fromDate cannot be after toDate".to_string(),
                ));
            }
        }

        let account_id = account_id.filter(|id| !id.is_empty());
        if let Some(ref id) = account_id {
            if !is_numeric_id(id) {
                return Err(LedgerError::InvalidQuery(format!(
                    "invalid account id format: {:?}",
                    id
                )));
            }
        }

        Ok(Self {
            account_id,
            from_date,
            to_date,
        })
    }

    /// A query with no filters
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// Returns true iff the transaction satisfies every present filter.
    ///
    /// Date bounds are inclusive on whichever ends are present.
    pub fn matches(&self, txn: &Transaction) -> bool {
        let account_matches = match self.account_id {
            Some(ref id) => *id == txn.account_id,
            None => true,
        };
        let after_from = self.from_date.map_or(true, |from| txn.timestamp >= from);
        let before_to = self.to_date.map_or(true, |to| txn.timestamp <= to);

        account_matches && after_from && before_to
    }
}
