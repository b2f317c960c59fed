//! Per-record structural validation for transaction logs.
//!
//! A log carries a fixed column set: TRANSACTION_ID, CUSTOMER_ID,
//! ACCOUNT_ID, AMOUNT, DATE_TIME. Header names are matched
//! case-insensitively and values are trimmed. A header missing any
//! required column fails every query against the log with `SchemaError`.

use chrono::NaiveDateTime;
use csv::StringRecord;
use rust_decimal::Decimal;

use crate::errors::{LedgerError, LedgerResult};
use crate::model::{is_numeric_id, Transaction, TransactionKind, TIMESTAMP_FORMAT};

/// Required header columns, in canonical spelling
const REQUIRED_COLUMNS: [&str; 5] = [
    "TRANSACTION_ID",
    "CUSTOMER_ID",
    "ACCOUNT_ID",
    "AMOUNT",
    "DATE_TIME",
];

/// Column positions resolved from a validated header row
#[derive(Debug, Clone, Copy)]
pub struct RecordLayout {
    transaction_id: usize,
    customer_id: usize,
    account_id: usize,
    amount: usize,
    date_time: usize,
}

impl RecordLayout {
    /// Resolves and validates the header row.
    ///
    /// Column name matching is case-insensitive. Extra columns are
    /// allowed and ignored.
    pub fn from_headers(headers: &StringRecord) -> LedgerResult<Self> {
        let find = |name: &str| -> LedgerResult<usize> {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    LedgerError::SchemaError(format!("missing required column: {}", name))
                })
        };

        Ok(Self {
            transaction_id: find(REQUIRED_COLUMNS[0])?,
            customer_id: find(REQUIRED_COLUMNS[1])?,
            account_id: find(REQUIRED_COLUMNS[2])?,
            amount: find(REQUIRED_COLUMNS[3])?,
            date_time: find(REQUIRED_COLUMNS[4])?,
        })
    }

    /// Parses one data row into a `Transaction`.
    ///
    /// Any failure here is `MalformedRecord` and fatal for the whole
    /// page fetch: missing or blank field, non-numeric identifier,
    /// unparsable or non-positive amount, unparsable timestamp.
    pub fn parse_row(&self, row: &StringRecord, kind: TransactionKind) -> LedgerResult<Transaction> {
        let transaction_id = self.required_field(row, self.transaction_id, "TRANSACTION_ID")?;
        let customer_id = self.required_field(row, self.customer_id, "CUSTOMER_ID")?;
        let account_id = self.required_field(row, self.account_id, "ACCOUNT_ID")?;
        let amount_str = self.required_field(row, self.amount, "AMOUNT")?;
        let date_time_str = self.required_field(row, self.date_time, "DATE_TIME")?;

        validate_id(&transaction_id, "transaction id")?;
        validate_id(&customer_id, "customer id")?;
        validate_id(&account_id, "account id")?;

        let amount = parse_amount(&amount_str)?;
        let timestamp = parse_timestamp(&date_time_str)?;

        Ok(Transaction {
            transaction_id,
            customer_id,
            account_id,
            amount,
            timestamp,
            kind,
        })
    }

    fn required_field(
        &self,
        row: &StringRecord,
        index: usize,
        name: &str,
    ) -> LedgerResult<String> {
        let value = row.get(index).map(str::trim).unwrap_or("");
        if value.is_empty() {
            return Err(LedgerError::MalformedRecord(format!(
                "required field is missing or empty: {}",
                name
            )));
        }
        Ok(value.to_string())
    }
}

fn validate_id(id: &str, field: &str) -> LedgerResult<()> {
    if !is_numeric_id(id) {
        return Err(LedgerError::MalformedRecord(format!(
            "invalid {} format: {:?}",
            field, id
        )));
    }
    Ok(())
}

fn parse_amount(amount_str: &str) -> LedgerResult<Decimal> {
    let amount: Decimal = amount_str.parse().map_err(|_| {
        LedgerError::MalformedRecord(format!("invalid amount format: {:?}", amount_str))
    })?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::MalformedRecord(format!(
            "amount must be positive: {}",
            amount_str
        )));
    }
    Ok(amount)
}

fn parse_timestamp(date_time_str: &str) -> LedgerResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(date_time_str, TIMESTAMP_FORMAT).map_err(|_| {
        LedgerError::MalformedRecord(format!("invalid date time format: {:?}", date_time_str))
    })
}
