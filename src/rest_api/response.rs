//! Error-to-status mapping for the HTTP surface.
//!
//! Client-input failures map to 400, a missing transaction log to 404,
//! server-side data failures to 500. The page body itself is the
//! serialized `TransactionPage`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::errors::LedgerError;

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: NaiveDateTime,
    pub status: u16,
    pub error: String,
    pub message: String,
}

fn status_for(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::InvalidQuery(_) | LedgerError::InvalidCursor(_) => StatusCode::BAD_REQUEST,
        LedgerError::SourceUnavailable { .. } => StatusCode::NOT_FOUND,
        LedgerError::SchemaError(_) | LedgerError::MalformedRecord(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn summary_for(err: &LedgerError) -> &'static str {
    match err {
        LedgerError::InvalidQuery(_) | LedgerError::InvalidCursor(_) => {
            "Transaction query error"
        }
        LedgerError::SourceUnavailable { .. } => "Transaction data file not found",
        LedgerError::SchemaError(_) | LedgerError::MalformedRecord(_) => "Internal server error",
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let body = ErrorBody {
            timestamp: chrono::Local::now().naive_local(),
            status: status.as_u16(),
            error: summary_for(&self).to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
