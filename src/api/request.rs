//! API request types
//!
//! Raw sales parameters as they arrive over HTTP or as JSON lines, and
//! their decoding into a [`Query`].
//!
//! List parameters (`customer_regions`, `genders`, `product_categories`,
//! `tags`, `payment_methods`) accept repeated keys, comma-separated values,
//! or both. Blank values are treated as absent.

use serde_json::{Map, Value};

use crate::dataset::parse_date;
use crate::query::{
    Criteria, Filter, MembershipField, PageWindow, Query, QueryError, SortDirection, SortField,
    SortSpec, DEFAULT_PAGE_SIZE,
};

use super::errors::{ApiError, ApiResult};

/// Maximum page size accepted by default
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size bounds applied when decoding requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiLimits {
    /// Page size used when the request gives none
    pub default_page_size: u32,
    /// Largest page size a request may ask for
    pub max_page_size: u32,
}

impl Default for ApiLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Undecoded sales parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesParams {
    pub search: Option<String>,
    pub customer_regions: Vec<String>,
    pub genders: Vec<String>,
    pub product_categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
    pub age_min: Option<String>,
    pub age_max: Option<String>,
    pub date_from: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl SalesParams {
    /// Builds parameters from URL query pairs. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = SalesParams::default();
        for (key, value) in pairs {
            params.set(key.as_ref(), value.as_ref());
        }
        params
    }

    /// Builds parameters from a JSON object.
    ///
    /// Values may be strings, numbers or arrays of either; `null` is absent.
    pub fn from_json(object: &Map<String, Value>) -> ApiResult<Self> {
        let mut params = SalesParams::default();
        for (key, value) in object {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        params.set(key, &scalar_to_string(key, item)?);
                    }
                }
                scalar => params.set(key, &scalar_to_string(key, scalar)?),
            }
        }
        Ok(params)
    }

    fn set(&mut self, key: &str, value: &str) {
        let key = key.trim().trim_end_matches("[]");
        match key {
            "customer_regions" => push_list(&mut self.customer_regions, value),
            "genders" => push_list(&mut self.genders, value),
            "product_categories" => push_list(&mut self.product_categories, value),
            "tags" => push_list(&mut self.tags, value),
            "payment_methods" => push_list(&mut self.payment_methods, value),
            "search" => self.search = non_blank(value),
            "age_min" => self.age_min = non_blank(value),
            "age_max" => self.age_max = non_blank(value),
            "date_from" => self.date_from = non_blank(value),
            "sort_by" => self.sort_by = non_blank(value),
            "sort_order" => self.sort_order = non_blank(value),
            "page" => self.page = non_blank(value),
            "page_size" => self.page_size = non_blank(value),
            _ => {}
        }
    }

    /// Decodes search and filter parameters
    pub fn to_criteria(&self) -> ApiResult<Criteria> {
        let mut criteria = Criteria::new();
        criteria.search = self.search.clone();

        let lists = [
            (MembershipField::CustomerRegion, &self.customer_regions),
            (MembershipField::Gender, &self.genders),
            (MembershipField::ProductCategory, &self.product_categories),
            (MembershipField::Tags, &self.tags),
            (MembershipField::PaymentMethod, &self.payment_methods),
        ];
        for (field, values) in lists {
            if !values.is_empty() {
                criteria.filters.push(Filter::membership(field, values.iter().cloned()));
            }
        }

        let age_min = parse_age("age_min", self.age_min.as_deref())?;
        let age_max = parse_age("age_max", self.age_max.as_deref())?;
        if age_min.is_some() || age_max.is_some() {
            criteria.filters.push(Filter::age_range(age_min, age_max));
        }

        if let Some(raw) = self.date_from.as_deref() {
            let date =
                parse_date(raw.trim()).ok_or_else(|| QueryError::invalid_date("date_from", raw))?;
            criteria.filters.push(Filter::date_from(date));
        }

        Ok(criteria)
    }

    /// Decodes the full query under the given page size limits
    pub fn to_query(&self, limits: &ApiLimits) -> ApiResult<Query> {
        let criteria = self.to_criteria()?;

        let field = match self.sort_by.as_deref() {
            Some(raw) => SortField::parse(raw)?,
            None => SortField::default(),
        };
        let direction = match self.sort_order.as_deref() {
            Some(raw) => SortDirection::parse(raw)?,
            None => SortDirection::default(),
        };

        let page = parse_page("page", self.page.as_deref(), 1)?;
        let page_size = parse_page("page_size", self.page_size.as_deref(), limits.default_page_size)?;
        if page_size > limits.max_page_size {
            return Err(ApiError::PageSizeExceeded(page_size, limits.max_page_size));
        }

        Ok(Query {
            criteria,
            sort: SortSpec { field, direction },
            page: PageWindow::new(page, page_size),
        })
    }
}

/// A line-oriented request: `{"op": "...", ...params}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Transactions(SalesParams),
    Summary(SalesParams),
    FilterOptions,
}

impl Request {
    /// Parse a request from a JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ApiError::InvalidParam(format!("Invalid JSON: {}", e)))?;

        let Value::Object(mut object) = value else {
            return Err(ApiError::InvalidParam(
                "request must be a JSON object".to_string(),
            ));
        };

        let op = match object.remove("op") {
            Some(Value::String(op)) => op,
            _ => return Err(ApiError::InvalidParam("Missing op".to_string())),
        };

        match op.as_str() {
            "transactions" => Ok(Request::Transactions(SalesParams::from_json(&object)?)),
            "summary" => Ok(Request::Summary(SalesParams::from_json(&object)?)),
            "filter_options" => Ok(Request::FilterOptions),
            other => Err(ApiError::InvalidParam(format!("Unknown op '{}'", other))),
        }
    }

    /// Operation name for logging
    pub fn op(&self) -> &'static str {
        match self {
            Request::Transactions(_) => "transactions",
            Request::Summary(_) => "summary",
            Request::FilterOptions => "filter_options",
        }
    }
}

fn push_list(list: &mut Vec<String>, value: &str) {
    list.extend(
        value
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
    );
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn scalar_to_string(key: &str, value: &Value) -> ApiResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ApiError::InvalidParam(format!(
            "{} must be a string, number or list",
            key
        ))),
    }
}

fn parse_integer(name: &str, raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidParam(format!("{} must be an integer, got '{}'", name, raw)))
}

/// Ages must be non-negative integers; the upper bound is checked by validation
fn parse_age(name: &str, raw: Option<&str>) -> ApiResult<Option<u32>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value = parse_integer(name, raw)?;
    u32::try_from(value)
        .map(Some)
        .map_err(|_| QueryError::out_of_range(name, value, crate::dataset::MAX_AGE).into())
}

fn parse_page(name: &str, raw: Option<&str>, default: u32) -> ApiResult<u32> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value = parse_integer(name, raw)?;
    if value < 1 {
        return Err(QueryError::invalid_page(name, value).into());
    }
    u32::try_from(value).map_err(|_| {
        ApiError::InvalidParam(format!("{} must be at most {}, got {}", name, u32::MAX, value))
    })
}
