//! Result types for query execution

use bigdecimal::BigDecimal;

use crate::dataset::{Dataset, Record, RecordId};

/// One page of an ordered, filtered result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// Ids of the records on this page, in result order
    pub ids: Vec<RecordId>,
    /// Number of records matching the criteria (all pages)
    pub total_matched: usize,
    /// Requested page (1-based)
    pub page: u32,
    /// Requested page size
    pub page_size: u32,
    /// Number of pages, 0 when nothing matched
    pub total_pages: usize,
}

impl PageResult {
    /// Returns the number of rows on this page
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if this page holds no rows
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolves the page's ids against the dataset they came from
    pub fn records<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a Record> + 'a {
        self.ids.iter().map(move |&id| dataset.record(id))
    }
}

/// Aggregate sums over every matching record, independent of paging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryResult {
    /// Sum of quantities; missing quantities count as 0
    pub total_units_sold: u64,
    /// Sum of pre-discount amounts
    pub total_amount: BigDecimal,
    /// Sum of `total_amount * discount_percentage / 100`
    pub total_discount: BigDecimal,
    /// Number of matching records
    pub total_sales_records: usize,
}

/// Page and summary produced from one filtering pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub page: PageResult,
    pub summary: SummaryResult,
}
