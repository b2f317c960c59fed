//! Opaque page cursor codec.
//!
//! A cursor is the *entire* server-side state of a paging sequence: one
//! offset per source log, counting records already consumed by prior
//! pages. Wire format is two non-negative integers joined by `:`, e.g.
//! `"5:3"`. An absent or empty token means start-of-sequence.

use crate::errors::{LedgerError, LedgerResult};

/// Token field delimiter
const DELIMITER: char = ':';

/// Resumption state for one paging sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageCursor {
    /// Records of the credit log consumed so far
    pub credit_offset: u64,
    /// Records of the debit log consumed so far
    pub debit_offset: u64,
}

impl PageCursor {
    /// Start-of-sequence cursor: nothing consumed from either log
    pub fn start() -> Self {
        Self::default()
    }

    /// Decodes a client-held token.
    ///
    /// An absent or empty token decodes to the start cursor without
    /// error. Anything else must be exactly two `:`-separated
    /// non-negative integers, otherwise `InvalidCursor`.
    pub fn decode(token: Option<&str>) -> LedgerResult<Self> {
        let token = match token {
            None => return Ok(Self::start()),
            Some(t) if t.is_empty() => return Ok(Self::start()),
            Some(t) => t,
        };

        let fields: Vec<&str> = token.split(DELIMITER).collect();
        if fields.len() != 2 {
            return Err(LedgerError::InvalidCursor(format!(
                "expected 2 fields, got {}",
                fields.len()
            )));
        }

        let credit_offset = parse_offset(fields[0])?;
        let debit_offset = parse_offset(fields[1])?;

        Ok(Self {
            credit_offset,
            debit_offset,
        })
    }

    /// Encodes this cursor as an opaque token.
    ///
    /// Pure formatting: callers only pass offsets produced internally.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.credit_offset, DELIMITER, self.debit_offset)
    }
}

fn parse_offset(field: &str) -> LedgerResult<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LedgerError::InvalidCursor(format!(
            "offset is not a non-negative integer: {:?}",
            field
        )));
    }
    field
        .parse::<u64>()
        .map_err(|_| LedgerError::InvalidCursor(format!("offset out of range: {:?}", field)))
}
