//! # API Errors
//!
//! Error types shared by the HTTP routes and the line-oriented CLI.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::query::QueryError;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Parameter could not be decoded
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    /// Query failed semantic validation
    #[error("{}", .0.message())]
    Validation(#[from] QueryError),

    /// Page size above the configured maximum
    #[error("page_size {0} exceeds maximum {1}")]
    PageSizeExceeded(u32, u32),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Query execution failed unexpectedly
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::InvalidParam(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PageSizeExceeded(_, _) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidParam(_) => "SALES_API_INVALID_PARAM",
            ApiError::Validation(err) => err.code().code(),
            ApiError::PageSizeExceeded(_, _) => "SALES_API_PAGE_SIZE_EXCEEDED",
            ApiError::Internal(_) => "SALES_API_INTERNAL",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.code().to_string(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
