//! One page of merged query results.

use serde::Serialize;

use super::Transaction;

/// Time-ascending page of transactions with continuation state.
///
/// `next_page_token` is present iff `has_more` is true.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
