//! Sales transaction record
//!
//! One row of the dataset. Records are created once by the loader (or by
//! tests) and never mutated afterwards; the query engine only reads them.
//!
//! Text fields use an empty string for "missing". Numeric and date fields
//! are `Option`: `None` means the source value was absent or invalid, and any
//! filter that needs the value treats the record as non-matching.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

/// A single sales transaction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Numeric transaction identifier
    pub transaction_id: u64,
    /// Transaction date (day granularity)
    pub date: Option<NaiveDate>,

    // Customer
    pub customer_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub gender: String,
    pub age: Option<u32>,
    pub customer_region: String,
    pub customer_type: String,

    // Product
    pub product_id: String,
    pub product_name: String,
    pub brand: String,
    pub product_category: String,
    /// Lowercased labels, split from the source's comma-separated list
    pub tags: Vec<String>,

    // Order
    pub quantity: Option<u32>,
    pub price_per_unit: Option<BigDecimal>,
    pub discount_percentage: Option<BigDecimal>,
    /// Pre-discount amount
    pub total_amount: Option<BigDecimal>,
    /// Post-discount amount, fixed at ingestion
    pub final_amount: Option<BigDecimal>,
    pub payment_method: String,
    pub order_status: String,
    pub delivery_type: String,

    // Fulfillment
    pub store_id: String,
    pub store_location: String,
    pub salesperson_id: String,
    pub employee_name: String,
}

impl Record {
    /// Creates an otherwise empty record with the given transaction id
    pub fn new(transaction_id: u64) -> Self {
        Self {
            transaction_id,
            ..Default::default()
        }
    }

    /// Monetary discount of this record: `total_amount * discount_percentage / 100`.
    ///
    /// Returns `None` when either operand is missing.
    pub fn discount_amount(&self) -> Option<BigDecimal> {
        let total = self.total_amount.as_ref()?;
        let percentage = self.discount_percentage.as_ref()?;
        Some((total * percentage) / BigDecimal::from(100))
    }

    /// Final amount as derived at ingestion time.
    ///
    /// Without a discount the final amount equals the total amount.
    pub fn derive_final_amount(&self) -> Option<BigDecimal> {
        let total = self.total_amount.as_ref()?;
        match self.discount_amount() {
            Some(discount) => Some(total.clone() - discount),
            None => Some(total.clone()),
        }
    }

    /// Digits of the phone number with every separator removed
    pub fn phone_digits(&self) -> String {
        self.phone_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect()
    }
}
