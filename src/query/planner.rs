//! Query planner
//!
//! Turns a declarative [`Query`] into an immutable [`QueryPlan`]. Planning is
//! deterministic and fails before any record is read if the query is invalid.

use super::ast::{Criteria, PageWindow, Query, SortSpec};
use super::errors::QueryResult;
use super::predicate::{PredicateBuilder, RecordPredicate};
use super::validate::QueryValidator;

/// Immutable execution plan for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// Predicate applied to every record
    pub predicate: RecordPredicate,
    /// Ordering of the filtered records
    pub sort: SortSpec,
    /// Page window to return
    pub page: PageWindow,
}

/// Plans queries
pub struct QueryPlanner;

impl QueryPlanner {
    /// Plans a full query, returning an immutable plan or error.
    pub fn plan(query: &Query) -> QueryResult<QueryPlan> {
        // 1. Validate every argument before building anything
        QueryValidator::validate(query)?;

        // 2. Normalize criteria into a predicate
        let predicate = PredicateBuilder::build(&query.criteria);

        // 3. Build immutable plan
        Ok(QueryPlan {
            predicate,
            sort: query.sort,
            page: query.page,
        })
    }

    /// Plans criteria alone, for operations that ignore sort and paging
    pub fn plan_criteria(criteria: &Criteria) -> QueryResult<RecordPredicate> {
        QueryValidator::validate_criteria(criteria)?;
        Ok(PredicateBuilder::build(criteria))
    }
}
