//! Sales HTTP Routes
//!
//! - `GET /transactions` - one page of matching transactions
//! - `GET /summary` - sums over every matching transaction
//! - `GET /filter-options` - distinct values per filterable field
//!
//! Query strings are read as raw pairs so list parameters may repeat
//! (`genders=Male&genders=Female`) or be comma-separated
//! (`genders=Male,Female`). Each query runs on the blocking pool.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::{
    ApiError, ApiHandler, ApiResult, FilterOptionsResponse, SalesParams, SummaryResponse,
    TransactionsResponse,
};

/// Create sales routes
pub fn sales_routes(handler: Arc<ApiHandler>) -> Router {
    Router::new()
        .route("/transactions", get(transactions_handler))
        .route("/summary", get(summary_handler))
        .route("/filter-options", get(filter_options_handler))
        .with_state(handler)
}

async fn transactions_handler(
    State(handler): State<Arc<ApiHandler>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let params = SalesParams::from_pairs(pairs);
    run_blocking(handler, move |h| h.transactions(&params))
        .await
        .map(Json)
}

async fn summary_handler(
    State(handler): State<Arc<ApiHandler>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let params = SalesParams::from_pairs(pairs);
    run_blocking(handler, move |h| h.summary(&params))
        .await
        .map(Json)
}

async fn filter_options_handler(
    State(handler): State<Arc<ApiHandler>>,
) -> Result<Json<FilterOptionsResponse>, ApiError> {
    run_blocking(handler, |h| Ok(h.filter_options()))
        .await
        .map(Json)
}

/// Runs a handler call on the blocking thread pool
async fn run_blocking<T, F>(handler: Arc<ApiHandler>, f: F) -> ApiResult<T>
where
    F: FnOnce(&ApiHandler) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&handler))
        .await
        .map_err(|e| ApiError::Internal(format!("query task failed: {}", e)))?
}
