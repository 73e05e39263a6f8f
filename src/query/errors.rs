//! Query error types
//!
//! Error codes:
//! - SALES_QUERY_INVALID_RANGE (REJECT)
//! - SALES_QUERY_UNKNOWN_SORT (REJECT)
//! - SALES_QUERY_INVALID_PAGE (REJECT)
//! - SALES_QUERY_INVALID_DATE (REJECT)

use std::fmt;

/// Severity levels for query errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Query error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Age bounds inverted or outside the accepted range
    SalesQueryInvalidRange,
    /// Unknown sort field or direction
    SalesQueryUnknownSort,
    /// Page number or page size below 1
    SalesQueryInvalidPage,
    /// Date bound could not be parsed
    SalesQueryInvalidDate,
}

impl QueryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::SalesQueryInvalidRange => "SALES_QUERY_INVALID_RANGE",
            QueryErrorCode::SalesQueryUnknownSort => "SALES_QUERY_UNKNOWN_SORT",
            QueryErrorCode::SalesQueryInvalidPage => "SALES_QUERY_INVALID_PAGE",
            QueryErrorCode::SalesQueryInvalidDate => "SALES_QUERY_INVALID_DATE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query error with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// Error code
    code: QueryErrorCode,
    /// Human-readable message
    message: String,
    /// Parameter name if applicable
    field: Option<String>,
}

impl QueryError {
    /// Create an inverted age range error
    pub fn inverted_range(min: u32, max: u32) -> Self {
        Self {
            code: QueryErrorCode::SalesQueryInvalidRange,
            message: format!("age_min ({}) cannot be greater than age_max ({})", min, max),
            field: Some("age_min".into()),
        }
    }

    /// Create an age bound out of range error
    pub fn out_of_range(field: impl Into<String>, value: i64, max: u32) -> Self {
        let f = field.into();
        Self {
            code: QueryErrorCode::SalesQueryInvalidRange,
            message: format!("{} must be between 0 and {}, got {}", f, max, value),
            field: Some(f),
        }
    }

    /// Create an unknown sort field error
    pub fn unknown_sort_field(value: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::SalesQueryUnknownSort,
            message: format!(
                "Unknown sort field '{}', expected date, quantity or customer_name",
                value.into()
            ),
            field: Some("sort_by".into()),
        }
    }

    /// Create an unknown sort direction error
    pub fn unknown_sort_direction(value: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::SalesQueryUnknownSort,
            message: format!(
                "Unknown sort order '{}', expected asc or desc",
                value.into()
            ),
            field: Some("sort_order".into()),
        }
    }

    /// Create an invalid page error
    pub fn invalid_page(field: impl Into<String>, value: i64) -> Self {
        let f = field.into();
        Self {
            code: QueryErrorCode::SalesQueryInvalidPage,
            message: format!("{} must be at least 1, got {}", f, value),
            field: Some(f),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: QueryErrorCode::SalesQueryInvalidDate,
            message: format!("{} must be a YYYY-MM-DD date, got '{}'", f, value.into()),
            field: Some(f),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the parameter name if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for QueryError {}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
