//! Query parameter binding for the transactions endpoint.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::errors::{LedgerError, LedgerResult};
use crate::model::TIMESTAMP_FORMAT;
use crate::query::TransactionQuery;

/// Raw query parameters as they arrive on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionParams {
    pub account_id: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub page_token: Option<String>,
}

impl TransactionParams {
    /// Parses date parameters and validates the filter.
    ///
    /// Returns the normalized query plus the untouched page token;
    /// token syntax is validated by the cursor codec during the fetch.
    pub fn into_query(self) -> LedgerResult<(TransactionQuery, Option<String>)> {
        let from_date = parse_date_param(self.from_date.as_deref(), "fromDate")?;
        let to_date = parse_date_param(self.to_date.as_deref(), "toDate")?;
        let query = TransactionQuery::new(self.account_id, from_date, to_date)?;
        Ok((query, self.page_token))
    }
}

fn parse_date_param(value: Option<&str>, name: &str) -> LedgerResult<Option<NaiveDateTime>> {
    match value {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map(Some)
            .map_err(|_| LedgerError::InvalidQuery(format!("invalid {}: {:?}", name, s))),
    }
}
