//! Query validation
//!
//! A query is accepted if:
//! - Every age bound lies within 0..=MAX_AGE
//! - age_min is not greater than age_max
//! - page and page_size are at least 1
//!
//! Validation runs before any record is evaluated; a rejected query does no
//! partial work.

use crate::dataset::MAX_AGE;

use super::ast::{Criteria, Filter, PageWindow, Query};
use super::errors::{QueryError, QueryResult};

/// Validates queries before execution
pub struct QueryValidator;

impl QueryValidator {
    /// Validates a full query (criteria and page window)
    pub fn validate(query: &Query) -> QueryResult<()> {
        Self::validate_criteria(&query.criteria)?;
        Self::validate_page(&query.page)
    }

    /// Validates search and filter arguments only
    pub fn validate_criteria(criteria: &Criteria) -> QueryResult<()> {
        for filter in criteria.filters.iter() {
            if let Filter::AgeRange { min, max } = filter {
                Self::validate_age_range(*min, *max)?;
            }
        }
        Ok(())
    }

    /// Validates the page window
    pub fn validate_page(window: &PageWindow) -> QueryResult<()> {
        if window.page < 1 {
            return Err(QueryError::invalid_page("page", window.page as i64));
        }
        if window.page_size < 1 {
            return Err(QueryError::invalid_page("page_size", window.page_size as i64));
        }
        Ok(())
    }

    fn validate_age_range(min: Option<u32>, max: Option<u32>) -> QueryResult<()> {
        if let Some(min) = min {
            if min > MAX_AGE {
                return Err(QueryError::out_of_range("age_min", min as i64, MAX_AGE));
            }
        }
        if let Some(max) = max {
            if max > MAX_AGE {
                return Err(QueryError::out_of_range("age_max", max as i64, MAX_AGE));
            }
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(QueryError::inverted_range(min, max));
            }
        }
        Ok(())
    }
}
