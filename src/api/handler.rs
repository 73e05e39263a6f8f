//! API Handler
//!
//! Decodes sales parameters, runs them through the query executor and shapes
//! the results into wire DTOs. Shared by the HTTP routes and the `query`
//! CLI command.
//!
//! The handler holds no lock: the dataset is immutable and every call owns
//! its intermediate state, so clones may serve requests in parallel.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::executor::QueryExecutor;
use crate::observability::{Event, MetricsRegistry, MetricsSnapshot, Timer};

use super::errors::{ApiError, ApiResult};
use super::request::{ApiLimits, Request, SalesParams};
use super::response::{FilterOptionsResponse, Response, SummaryResponse, TransactionsResponse};

/// Request handler over one dataset snapshot
#[derive(Debug, Clone)]
pub struct ApiHandler {
    executor: QueryExecutor,
    metrics: Arc<MetricsRegistry>,
    limits: ApiLimits,
}

impl ApiHandler {
    /// Create a handler with a fresh metrics registry
    pub fn new(dataset: Arc<Dataset>, limits: ApiLimits) -> Self {
        Self::with_metrics(dataset, limits, Arc::new(MetricsRegistry::new()))
    }

    /// Create a handler reporting into an existing registry
    pub fn with_metrics(
        dataset: Arc<Dataset>,
        limits: ApiLimits,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        metrics.set_records_loaded(dataset.len() as u64);
        Self {
            executor: QueryExecutor::new(dataset),
            metrics,
            limits,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        self.executor.dataset()
    }

    pub fn limits(&self) -> &ApiLimits {
        &self.limits
    }

    /// Current counter values
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Returns one page of transactions
    ///
    /// Flow:
    /// 1. Decode parameters into a query
    /// 2. Execute (validate, filter, sort, paginate)
    /// 3. Resolve the page's records into DTOs
    pub fn transactions(&self, params: &SalesParams) -> ApiResult<TransactionsResponse> {
        let timer = Timer::new();
        debug!(event = %Event::QueryReceived, op = "transactions", ?params);

        // 1. Decode
        let query = params
            .to_query(&self.limits)
            .map_err(|err| self.rejected("transactions", err))?;

        // 2. Execute
        let page = self
            .executor
            .browse(&query)
            .map_err(|err| self.rejected("transactions", err.into()))?;

        // 3. Resolve
        let dataset = self.executor.dataset();
        let response = TransactionsResponse::from_page(&page, page.records(dataset));

        self.metrics.increment_queries_executed();
        self.metrics.add_rows_returned(page.len() as u64);
        info!(
            event = %Event::QueryExecuted,
            total = page.total_matched,
            returned = page.len(),
            page = page.page,
            total_pages = page.total_pages,
            elapsed_ms = timer.elapsed_ms()
        );

        Ok(response)
    }

    /// Returns summary sums over every record matching the criteria
    pub fn summary(&self, params: &SalesParams) -> ApiResult<SummaryResponse> {
        let timer = Timer::new();
        debug!(event = %Event::QueryReceived, op = "summary", ?params);

        let criteria = params
            .to_criteria()
            .map_err(|err| self.rejected("summary", err))?;

        let summary = self
            .executor
            .summarize(&criteria)
            .map_err(|err| self.rejected("summary", err.into()))?;

        self.metrics.increment_summaries();
        info!(
            event = %Event::SummaryComplete,
            records = summary.total_sales_records,
            elapsed_ms = timer.elapsed_ms()
        );

        Ok(SummaryResponse::from(&summary))
    }

    /// Returns the distinct values of every filterable field
    pub fn filter_options(&self) -> FilterOptionsResponse {
        let options = self.executor.filter_options();
        self.metrics.increment_filter_option_requests();
        debug!(event = %Event::FilterOptionsServed);
        FilterOptionsResponse::from(&options)
    }

    /// Handle a raw JSON request line, always producing an envelope
    pub fn handle(&self, json_request: &str) -> Response {
        let request = match Request::parse(json_request) {
            Ok(r) => r,
            Err(e) => return Response::error(&self.rejected("parse", e)),
        };

        match self.dispatch(request) {
            Ok(data) => Response::success(data),
            Err(e) => Response::error(&e),
        }
    }

    fn dispatch(&self, request: Request) -> ApiResult<Value> {
        let data = match &request {
            Request::Transactions(params) => serde_json::to_value(self.transactions(params)?),
            Request::Summary(params) => serde_json::to_value(self.summary(params)?),
            Request::FilterOptions => serde_json::to_value(self.filter_options()),
        };
        data.map_err(|e| ApiError::Internal(format!("{} serialization failed: {}", request.op(), e)))
    }

    fn rejected(&self, op: &str, err: ApiError) -> ApiError {
        self.metrics.increment_queries_rejected();
        warn!(event = %Event::QueryRejected, op, code = err.code(), reason = %err);
        err
    }
}
