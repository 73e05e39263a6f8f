//! API response types
//!
//! Wire DTOs for transactions, summaries and filter options, plus the
//! `{"status": ...}` envelope used by line-oriented requests.
//!
//! Presentation rules:
//! - Categorical values (gender, region, category, payment method, tags)
//!   are title-cased: first character upper, rest lower
//! - Money is rounded to 2 decimals only here

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::Serialize;
use serde_json::{json, Value};

use crate::dataset::Record;
use crate::executor::{FilterOptions, PageResult, SummaryResult};

use super::errors::ApiError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One transaction row
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransactionDto {
    pub transaction_id: u64,
    pub date: Option<String>,
    pub customer_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub gender: String,
    pub age: Option<u32>,
    pub customer_region: String,
    pub customer_type: String,
    pub product_id: String,
    pub product_name: String,
    pub brand: String,
    pub product_category: String,
    /// Comma-joined, title-cased tags
    pub tags: String,
    pub quantity: Option<u32>,
    pub price_per_unit: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub total_amount: Option<f64>,
    pub final_amount: Option<f64>,
    pub payment_method: String,
    pub order_status: String,
    pub delivery_type: String,
    pub store_id: String,
    pub store_location: String,
    pub salesperson_id: String,
    pub employee_name: String,
}

impl From<&Record> for TransactionDto {
    fn from(record: &Record) -> Self {
        Self {
            transaction_id: record.transaction_id,
            date: record.date.map(|d| d.format(DATE_FORMAT).to_string()),
            customer_id: record.customer_id.clone(),
            customer_name: record.customer_name.clone(),
            phone_number: record.phone_number.clone(),
            gender: title_case(&record.gender),
            age: record.age,
            customer_region: title_case(&record.customer_region),
            customer_type: record.customer_type.clone(),
            product_id: record.product_id.clone(),
            product_name: record.product_name.clone(),
            brand: record.brand.clone(),
            product_category: title_case(&record.product_category),
            tags: record
                .tags
                .iter()
                .map(|tag| title_case(tag))
                .collect::<Vec<_>>()
                .join(","),
            quantity: record.quantity,
            price_per_unit: record.price_per_unit.as_ref().map(money),
            discount_percentage: record.discount_percentage.as_ref().map(money),
            total_amount: record.total_amount.as_ref().map(money),
            final_amount: record.final_amount.as_ref().map(money),
            payment_method: title_case(&record.payment_method),
            order_status: record.order_status.clone(),
            delivery_type: record.delivery_type.clone(),
            store_id: record.store_id.clone(),
            store_location: record.store_location.clone(),
            salesperson_id: record.salesperson_id.clone(),
            employee_name: record.employee_name.clone(),
        }
    }
}

/// One page of transactions
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionDto>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: usize,
}

impl TransactionsResponse {
    /// Resolves a page against its records
    pub fn from_page<'a>(page: &PageResult, records: impl Iterator<Item = &'a Record>) -> Self {
        Self {
            transactions: records.map(TransactionDto::from).collect(),
            total: page.total_matched,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Summary statistics
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryResponse {
    pub total_units_sold: u64,
    pub total_amount: f64,
    pub total_discount: f64,
    pub total_sales_records: usize,
}

impl From<&SummaryResult> for SummaryResponse {
    fn from(summary: &SummaryResult) -> Self {
        Self {
            total_units_sold: summary.total_units_sold,
            total_amount: money(&summary.total_amount),
            total_discount: money(&summary.total_discount),
            total_sales_records: summary.total_sales_records,
        }
    }
}

/// Values available to each filter
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterOptionsResponse {
    pub customer_regions: Vec<String>,
    pub genders: Vec<String>,
    pub product_categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub tags: Vec<String>,
}

impl From<&FilterOptions> for FilterOptionsResponse {
    fn from(options: &FilterOptions) -> Self {
        Self {
            customer_regions: titled(&options.customer_regions),
            genders: titled(&options.genders),
            product_categories: titled(&options.product_categories),
            payment_methods: titled(&options.payment_methods),
            tags: titled(&options.tags),
        }
    }
}

fn titled(values: &[String]) -> Vec<String> {
    values.iter().map(|value| title_case(value)).collect()
}

/// First character upper-case, the rest lower-case ("upi" -> "Upi")
pub fn title_case(value: &str) -> String {
    let value = value.trim();
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Rounds to 2 decimals for display.
///
/// A value with no `f64` form becomes NaN, which serializes as `null`.
pub fn money(value: &BigDecimal) -> f64 {
    value.round(2).to_f64().unwrap_or(f64::NAN)
}

/// Line-oriented response envelope
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// `{"status": "ok", "data": ...}`
    Success(Value),
    /// `{"status": "error", "code": ..., "message": ...}`
    Error { code: String, message: String },
}

impl Response {
    /// Create a success response
    pub fn success(data: Value) -> Self {
        Response::Success(data)
    }

    /// Create an error response
    pub fn error(err: &ApiError) -> Self {
        Response::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }

    /// Envelope as a JSON value
    pub fn to_value(&self) -> Value {
        match self {
            Response::Success(data) => json!({"status": "ok", "data": data}),
            Response::Error { code, message } => {
                json!({"status": "error", "code": code, "message": message})
            }
        }
    }

    /// Convert to a single-line JSON string
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Check if this is a success response
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}
