//! Query executor
//!
//! Executes queries against a shared dataset snapshot.
//!
//! Execution flow (strict order):
//! 1. Validate the query and build its predicate
//! 2. Filter the dataset in dataset order
//! 3. Aggregate over the filtered ids (summary branch)
//! 4. Sort the filtered ids
//! 5. Slice the requested page
//!
//! Steps 3 and 4-5 consume the same filtered vector, so page and summary are
//! always consistent within one call.

use std::sync::Arc;

use tracing::debug;

use crate::dataset::{Dataset, RecordId};
use crate::query::{Criteria, Query, QueryPlan, QueryPlanner, QueryResult};

use super::aggregator::Aggregator;
use super::filters::FilterEvaluator;
use super::options::FilterOptions;
use super::paginator::Paginator;
use super::result::{PageResult, QueryOutcome, SummaryResult};
use super::sorter::ResultSorter;

/// Query executor bound to one dataset snapshot
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    dataset: Arc<Dataset>,
}

impl QueryExecutor {
    /// Creates a new executor over `dataset`
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// The dataset this executor reads
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Executes a query, producing its page and its summary.
    ///
    /// This method is deterministic: same query + same dataset = same result.
    pub fn execute(&self, query: &Query) -> QueryResult<QueryOutcome> {
        // Step 1: Validate and plan
        let plan = QueryPlanner::plan(query)?;

        // Step 2: Filter
        let mut ids = FilterEvaluator::evaluate(&self.dataset, &plan.predicate);

        // Step 3: Summary over the full filtered set
        let summary = Aggregator::aggregate(&self.dataset, &ids);

        // Steps 4-5: Order and page
        let page = self.order_and_page(&plan, &mut ids);

        Ok(QueryOutcome { page, summary })
    }

    /// Executes a query, producing only its page
    pub fn browse(&self, query: &Query) -> QueryResult<PageResult> {
        let plan = QueryPlanner::plan(query)?;
        let mut ids = FilterEvaluator::evaluate(&self.dataset, &plan.predicate);
        Ok(self.order_and_page(&plan, &mut ids))
    }

    /// Computes the summary for the given criteria; sort and paging do not apply
    pub fn summarize(&self, criteria: &Criteria) -> QueryResult<SummaryResult> {
        let predicate = QueryPlanner::plan_criteria(criteria)?;
        let ids = FilterEvaluator::evaluate(&self.dataset, &predicate);
        debug!(matched = ids.len(), "summary filter applied");
        Ok(Aggregator::aggregate(&self.dataset, &ids))
    }

    /// Distinct values for every membership filter
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::collect(&self.dataset)
    }

    fn order_and_page(&self, plan: &QueryPlan, ids: &mut Vec<RecordId>) -> PageResult {
        debug!(
            matched = ids.len(),
            sort_by = plan.sort.field.as_str(),
            sort_order = plan.sort.direction.as_str(),
            "query filter applied"
        );

        ResultSorter::sort(&self.dataset, ids, &plan.sort);
        Paginator::paginate(ids, plan.page)
    }
}
