//! Axum HTTP server for the transactions endpoint.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::errors::{LedgerError, LedgerResult};
use crate::model::TransactionPage;
use crate::observability;
use crate::pager::PageMerger;

use super::params::TransactionParams;

/// Builds the router around a configured page merger.
pub fn router(merger: Arc<PageMerger>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/transactions", get(list_transactions))
        .layer(cors)
        .with_state(merger)
}

/// Binds `addr` and serves requests until the process exits.
pub async fn serve(merger: Arc<PageMerger>, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    observability::info("SERVER_STARTED", &[("addr", addr)]);
    axum::serve(listener, router(merger)).await
}

async fn list_transactions(
    State(merger): State<Arc<PageMerger>>,
    Query(params): Query<TransactionParams>,
) -> Result<Json<TransactionPage>, LedgerError> {
    match fetch(&merger, params) {
        Ok(page) => {
            let count = page.transactions.len().to_string();
            let has_more = page.has_more.to_string();
            observability::info(
                "PAGE_SERVED",
                &[("count", count.as_str()), ("has_more", has_more.as_str())],
            );
            Ok(Json(page))
        }
        Err(err) => {
            let message = err.to_string();
            let fields = [("message", message.as_str())];
            if err.is_client_error() {
                observability::warn("REQUEST_REJECTED", &fields);
            } else {
                observability::error("FETCH_FAILED", &fields);
            }
            Err(err)
        }
    }
}

fn fetch(merger: &PageMerger, params: TransactionParams) -> LedgerResult<TransactionPage> {
    let (query, page_token) = params.into_query()?;
    merger.fetch_page(&query, page_token.as_deref())
}
