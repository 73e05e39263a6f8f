//! API Layer
//!
//! The boundary between callers and the query engine. Decodes raw
//! parameters, enforces page size limits and shapes results for the wire.
//!
//! # Supported Operations
//!
//! - transactions
//! - summary
//! - filter_options

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use handler::ApiHandler;
pub use request::{ApiLimits, Request, SalesParams, MAX_PAGE_SIZE};
pub use response::{
    money, title_case, FilterOptionsResponse, Response, SummaryResponse, TransactionDto,
    TransactionsResponse,
};
