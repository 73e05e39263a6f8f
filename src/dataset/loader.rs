//! Dataset loader
//!
//! Reads sales transactions from a JSON array (or JSON Lines when the file
//! name ends in `.jsonl`) and normalizes each row into a [`Record`]:
//!
//! - Column keys are lowercased with spaces replaced by `_`
//! - Text fields are trimmed
//! - Gender, region, category, tags and payment method are lowercased
//! - Ages must be JSON integers in 0..=150, anything else is invalid
//! - Dates must be `YYYY-MM-DD` (a trailing time component is ignored)
//! - `final_amount` is derived from total and discount when absent
//!
//! Rows without a usable `transaction_id` are skipped and counted.

use std::fs;
use std::path::Path;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::errors::{DatasetError, DatasetResult};
use super::record::Record;
use super::snapshot::Dataset;

/// Highest age accepted as valid
pub const MAX_AGE: u32 = 150;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome counters of a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows turned into records
    pub loaded: usize,
    /// Rows dropped for lack of a transaction id
    pub skipped: usize,
}

/// Builds a [`Dataset`] from JSON documents
pub struct DatasetLoader;

impl DatasetLoader {
    /// Loads a dataset file from disk
    pub fn load_path(path: &Path) -> DatasetResult<(Dataset, LoadReport)> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_lines = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("jsonl"))
            .unwrap_or(false);

        if is_lines {
            Self::from_json_lines(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Parses a JSON array of transaction objects
    pub fn from_json_str(content: &str) -> DatasetResult<(Dataset, LoadReport)> {
        let root: Value =
            serde_json::from_str(content).map_err(|source| DatasetError::Json {
                line: source.line(),
                source,
            })?;

        match root {
            Value::Array(rows) => Self::from_values(rows),
            _ => Err(DatasetError::InvalidDocument(
                "root must be an array of transaction objects".to_string(),
            )),
        }
    }

    /// Parses one transaction object per non-empty line
    pub fn from_json_lines(content: &str) -> DatasetResult<(Dataset, LoadReport)> {
        let mut rows = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = serde_json::from_str(line).map_err(|source| DatasetError::Json {
                line: index + 1,
                source,
            })?;
            rows.push(row);
        }
        Self::from_values(rows)
    }

    /// Normalizes already-parsed rows
    pub fn from_values(rows: Vec<Value>) -> DatasetResult<(Dataset, LoadReport)> {
        let mut report = LoadReport::default();
        let mut records = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            let object = match row {
                Value::Object(object) => object,
                other => {
                    return Err(DatasetError::InvalidDocument(format!(
                        "row {} is not an object: {}",
                        index,
                        type_name(&other)
                    )))
                }
            };

            let row: RawRow = serde_json::from_value(Value::Object(normalize_keys(object)))
                .map_err(|e| DatasetError::InvalidDocument(format!("row {}: {}", index, e)))?;

            match row.into_record() {
                Some(record) => {
                    records.push(record);
                    report.loaded += 1;
                }
                None => {
                    warn!(row = index, "skipping row without a valid transaction_id");
                    report.skipped += 1;
                }
            }
        }

        debug!(loaded = report.loaded, skipped = report.skipped, "dataset rows normalized");
        Ok((Dataset::new(records), report))
    }
}

/// Lowercases keys and replaces spaces with underscores ("Customer Name" -> "customer_name")
fn normalize_keys(object: Map<String, Value>) -> Map<String, Value> {
    object
        .into_iter()
        .map(|(key, value)| (key.trim().to_lowercase().replace(' ', "_"), value))
        .collect()
}

/// One source row after key normalization.
///
/// Every field is lenient: a value of the wrong shape reads as missing
/// instead of failing the row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    #[serde(deserialize_with = "lenient::id")]
    transaction_id: Option<u64>,
    #[serde(deserialize_with = "lenient::date")]
    date: Option<NaiveDate>,

    #[serde(deserialize_with = "lenient::text")]
    customer_id: String,
    #[serde(deserialize_with = "lenient::text")]
    customer_name: String,
    #[serde(deserialize_with = "lenient::text")]
    phone_number: String,
    #[serde(deserialize_with = "lenient::text")]
    gender: String,
    #[serde(deserialize_with = "lenient::age")]
    age: Option<u32>,
    #[serde(deserialize_with = "lenient::text")]
    customer_region: String,
    #[serde(deserialize_with = "lenient::text")]
    customer_type: String,

    #[serde(deserialize_with = "lenient::text")]
    product_id: String,
    #[serde(deserialize_with = "lenient::text")]
    product_name: String,
    #[serde(deserialize_with = "lenient::text")]
    brand: String,
    #[serde(deserialize_with = "lenient::text")]
    product_category: String,
    #[serde(deserialize_with = "lenient::tags")]
    tags: Vec<String>,

    #[serde(deserialize_with = "lenient::quantity")]
    quantity: Option<u32>,
    #[serde(deserialize_with = "lenient::decimal")]
    price_per_unit: Option<BigDecimal>,
    #[serde(deserialize_with = "lenient::decimal")]
    discount_percentage: Option<BigDecimal>,
    #[serde(deserialize_with = "lenient::decimal")]
    total_amount: Option<BigDecimal>,
    #[serde(deserialize_with = "lenient::decimal")]
    final_amount: Option<BigDecimal>,
    #[serde(deserialize_with = "lenient::text")]
    payment_method: String,
    #[serde(deserialize_with = "lenient::text")]
    order_status: String,
    #[serde(deserialize_with = "lenient::text")]
    delivery_type: String,

    #[serde(deserialize_with = "lenient::text")]
    store_id: String,
    #[serde(deserialize_with = "lenient::text")]
    store_location: String,
    #[serde(deserialize_with = "lenient::text")]
    salesperson_id: String,
    #[serde(deserialize_with = "lenient::text")]
    employee_name: String,
}

impl RawRow {
    /// Builds the record, or `None` without a transaction id
    fn into_record(self) -> Option<Record> {
        let mut record = Record {
            transaction_id: self.transaction_id?,
            date: self.date,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            phone_number: self.phone_number,
            gender: self.gender.to_lowercase(),
            age: self.age,
            customer_region: self.customer_region.to_lowercase(),
            customer_type: self.customer_type,
            product_id: self.product_id,
            product_name: self.product_name,
            brand: self.brand,
            product_category: self.product_category.to_lowercase(),
            tags: self.tags,
            quantity: self.quantity,
            price_per_unit: self.price_per_unit,
            discount_percentage: self.discount_percentage,
            total_amount: self.total_amount,
            final_amount: self.final_amount,
            payment_method: self.payment_method.to_lowercase(),
            order_status: self.order_status,
            delivery_type: self.delivery_type,
            store_id: self.store_id,
            store_location: self.store_location,
            salesperson_id: self.salesperson_id,
            employee_name: self.employee_name,
        };

        if record.final_amount.is_none() {
            record.final_amount = record.derive_final_amount();
        }

        Some(record)
    }
}

/// Field readers that accept any JSON value
mod lenient {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{parse_date, MAX_AGE};

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        })
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Only integral JSON numbers count as ages; strings are invalid
    pub fn age<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(Value::deserialize(d)?
            .as_u64()
            .and_then(|age| u32::try_from(age).ok())
            .filter(|age| *age <= MAX_AGE))
    }

    pub fn quantity<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_u64().and_then(|q| u32::try_from(q).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<BigDecimal>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => BigDecimal::from_str(&n.to_string()).ok(),
            Value::String(s) => BigDecimal::from_str(s.trim()).ok(),
            _ => None,
        })
    }

    pub fn date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => parse_date(s.trim()),
            _ => None,
        })
    }

    /// Comma-separated string or array of strings, lowercased
    pub fn tags<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let labels: Vec<String> = match Value::deserialize(d)? {
            Value::String(s) => s.split(',').map(str::to_string).collect(),
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok(labels
            .into_iter()
            .map(|label| label.trim().to_lowercase())
            .filter(|label| !label.is_empty())
            .collect())
    }
}

/// Parses `YYYY-MM-DD`, ignoring a trailing time component
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok().or_else(|| {
        raw.get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, DATE_FORMAT).ok())
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn load(rows: Value) -> (Dataset, LoadReport) {
        DatasetLoader::from_json_str(&rows.to_string()).unwrap()
    }

    #[test]
    fn test_normalizes_row() {
        let (dataset, report) = load(json!([{
            "Transaction ID": 7,
            "Date": "2023-03-23",
            "Customer Name": "  Neha Khan ",
            "Phone Number": "9720639364",
            "Gender": "Male",
            "Age": 21,
            "Customer Region": "East",
            "Product Category": "Beauty",
            "Tags": "organic, SkinCare,",
            "Quantity": 5,
            "Total Amount": 21340.0,
            "Discount Percentage": 12,
            "Payment Method": "UPI"
        }]));

        assert_eq!(report, LoadReport { loaded: 1, skipped: 0 });
        let record = dataset.record(0);
        assert_eq!(record.transaction_id, 7);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 3, 23));
        assert_eq!(record.customer_name, "Neha Khan");
        assert_eq!(record.gender, "male");
        assert_eq!(record.age, Some(21));
        assert_eq!(record.customer_region, "east");
        assert_eq!(record.product_category, "beauty");
        assert_eq!(record.tags, vec!["organic", "skincare"]);
        assert_eq!(record.quantity, Some(5));
        assert_eq!(record.payment_method, "upi");
        assert_eq!(record.final_amount, Some(dec("18779.2")));
    }

    #[test]
    fn test_invalid_fields_become_none() {
        let (dataset, _) = load(json!([{
            "transaction_id": "12",
            "date": "23/03/2023",
            "age": "40",
            "quantity": "many",
            "total_amount": "n/a"
        }]));

        let record = dataset.record(0);
        assert_eq!(record.transaction_id, 12);
        assert_eq!(record.date, None);
        assert_eq!(record.age, None);
        assert_eq!(record.quantity, None);
        assert_eq!(record.total_amount, None);
        assert_eq!(record.final_amount, None);
    }

    #[test]
    fn test_null_and_mistyped_fields_read_as_missing() {
        let (dataset, report) = load(json!([{
            "transaction_id": 3,
            "customer_name": null,
            "gender": ["male"],
            "age": 33.5,
            "tags": ["Organic", 7, " "],
            "quantity": {"n": 2},
            "store_id": 42,
            "unknown_column": "ignored"
        }]));

        assert_eq!(report.loaded, 1);
        let record = dataset.record(0);
        assert_eq!(record.customer_name, "");
        assert_eq!(record.gender, "");
        assert_eq!(record.age, None);
        assert_eq!(record.tags, vec!["organic"]);
        assert_eq!(record.quantity, None);
        assert_eq!(record.store_id, "42");
    }

    #[test]
    fn test_age_out_of_range_is_invalid() {
        let (dataset, _) = load(json!([
            {"transaction_id": 1, "age": 151},
            {"transaction_id": 2, "age": -3},
            {"transaction_id": 3, "age": 150}
        ]));
        assert_eq!(dataset.record(0).age, None);
        assert_eq!(dataset.record(1).age, None);
        assert_eq!(dataset.record(2).age, Some(150));
    }

    #[test]
    fn test_source_final_amount_is_kept() {
        let (dataset, _) = load(json!([{
            "transaction_id": 1,
            "total_amount": 100,
            "discount_percentage": 10,
            "final_amount": 95
        }]));
        assert_eq!(dataset.record(0).final_amount, Some(dec("95")));
    }

    #[test]
    fn test_rows_without_id_are_skipped() {
        let (dataset, report) = load(json!([
            {"transaction_id": 1},
            {"customer_name": "nobody"},
            {"transaction_id": "abc"},
            {"transaction_id": 2}
        ]));
        assert_eq!(report, LoadReport { loaded: 2, skipped: 2 });
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.record(1).transaction_id, 2);
    }

    #[test]
    fn test_datetime_dates_are_truncated() {
        let (dataset, _) = load(json!([{"transaction_id": 1, "date": "2021-10-01T00:00:00"}]));
        assert_eq!(dataset.record(0).date, NaiveDate::from_ymd_opt(2021, 10, 1));
    }

    #[test]
    fn test_root_must_be_array() {
        let err = DatasetLoader::from_json_str(r#"{"transaction_id": 1}"#).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidDocument(_)));
    }

    #[test]
    fn test_rows_must_be_objects() {
        let err = DatasetLoader::from_json_str("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("row 0 is not an object"));
    }

    #[test]
    fn test_json_lines() {
        let content = "{\"transaction_id\": 1}\n\n{\"transaction_id\": 2}\n";
        let (dataset, report) = DatasetLoader::from_json_lines(content).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(report.loaded, 2);

        let err = DatasetLoader::from_json_lines("{\"transaction_id\": 1}\n{oops").unwrap_err();
        assert!(matches!(err, DatasetError::Json { line: 2, .. }));
    }
}
