//! Query structures
//!
//! Defines the declarative query handed to the engine. Queries are plain
//! values: building one never touches the dataset.

use chrono::NaiveDate;

use super::errors::{QueryError, QueryResult};

/// Categorical fields that support membership filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MembershipField {
    CustomerRegion,
    Gender,
    ProductCategory,
    /// Multi-valued: a record matches if any of its tags is requested
    Tags,
    PaymentMethod,
}

impl MembershipField {
    /// Every membership field in a fixed order
    pub const ALL: [MembershipField; 5] = [
        MembershipField::CustomerRegion,
        MembershipField::Gender,
        MembershipField::ProductCategory,
        MembershipField::Tags,
        MembershipField::PaymentMethod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipField::CustomerRegion => "customer_region",
            MembershipField::Gender => "gender",
            MembershipField::ProductCategory => "product_category",
            MembershipField::Tags => "tags",
            MembershipField::PaymentMethod => "payment_method",
        }
    }
}

/// A single filter constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Field value must be one of `values` (case-insensitive)
    Membership {
        field: MembershipField,
        values: Vec<String>,
    },
    /// Inclusive age bounds; an absent bound is unconstrained
    AgeRange { min: Option<u32>, max: Option<u32> },
    /// Inclusive lower bound on the transaction date
    DateFrom(NaiveDate),
}

impl Filter {
    /// Create a membership filter
    pub fn membership<I, S>(field: MembershipField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Membership {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an age range filter
    pub fn age_range(min: Option<u32>, max: Option<u32>) -> Self {
        Filter::AgeRange { min, max }
    }

    /// Create a date lower bound filter
    pub fn date_from(date: NaiveDate) -> Self {
        Filter::DateFrom(date)
    }

    /// Returns the filter kind name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Filter::Membership { field, .. } => field.as_str(),
            Filter::AgeRange { .. } => "age_range",
            Filter::DateFrom(_) => "date_from",
        }
    }
}

/// Ordered list of filters, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter
    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Adds a filter (builder form)
    pub fn with(mut self, filter: Filter) -> Self {
        self.push(filter);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

/// The part of a query that decides which records match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Free-text search term
    pub search: Option<String>,
    /// Filter constraints
    pub filters: FilterSet,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Adds a filter
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }
}

/// Sortable fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Date,
    Quantity,
    CustomerName,
}

impl SortField {
    /// Parses a sort field name (`date`, `quantity` or `customer_name`)
    pub fn parse(value: &str) -> QueryResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "quantity" => Ok(SortField::Quantity),
            "customer_name" => Ok(SortField::CustomerName),
            _ => Err(QueryError::unknown_sort_field(value)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Quantity => "quantity",
            SortField::CustomerName => "customer_name",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parses `asc` or `desc`
    pub fn parse(value: &str) -> QueryResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(QueryError::unknown_sort_direction(value)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort specification, `date desc` by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by
    pub field: SortField,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Default page size when the caller does not give one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 1-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub page_size: u32,
}

impl PageWindow {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Number of rows preceding this page
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// A complete query: criteria plus ordering and page window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub criteria: Criteria,
    pub sort: SortSpec,
    pub page: PageWindow,
}

impl Query {
    /// Creates a query with no constraints, default sort and first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.criteria.search = Some(term.into());
        self
    }

    /// Adds a filter
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.criteria.filters.push(filter);
        self
    }

    /// Replaces the criteria
    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Sets the sort specification
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the page window
    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = PageWindow::new(page, page_size);
        self
    }
}
