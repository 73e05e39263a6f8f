//! Query model and planning
//!
//! A query is a plain value: search term, filters, sort and page window.
//! Planning validates it and turns the criteria into a single record
//! predicate.
//!
//! # Semantics
//!
//! - Search and all filters are combined with AND
//! - Within a membership filter, values are alternatives (OR)
//! - Tags match when any of the record's tags is requested
//! - Empty or blank values never constrain and never fail
//! - Records missing a field never match a clause on that field

mod ast;
mod errors;
mod planner;
mod predicate;
mod validate;

pub use ast::{
    Criteria, Filter, FilterSet, MembershipField, PageWindow, Query, SortDirection, SortField,
    SortSpec, DEFAULT_PAGE_SIZE,
};
pub use errors::{QueryError, QueryErrorCode, QueryResult, Severity};
pub use planner::{QueryPlan, QueryPlanner};
pub use predicate::{Clause, PredicateBuilder, RecordPredicate, SearchPredicate};
pub use validate::QueryValidator;
