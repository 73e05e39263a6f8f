//! Summary aggregation
//!
//! Sums run over the whole filtered sequence, before pagination. Money is
//! accumulated exactly; rounding is left to presentation.

use bigdecimal::BigDecimal;

use crate::dataset::{Dataset, RecordId};

use super::result::SummaryResult;

/// Computes summary sums over filtered records
pub struct Aggregator;

impl Aggregator {
    /// Aggregates the records referenced by `ids`.
    ///
    /// Missing quantities and amounts contribute 0. A record's discount is
    /// 0 unless both its total amount and discount percentage are present.
    pub fn aggregate(dataset: &Dataset, ids: &[RecordId]) -> SummaryResult {
        let mut total_units_sold: u64 = 0;
        let mut total_amount = BigDecimal::from(0);
        let mut total_discount = BigDecimal::from(0);

        for &id in ids {
            let record = dataset.record(id);

            total_units_sold += u64::from(record.quantity.unwrap_or(0));

            if let Some(amount) = &record.total_amount {
                total_amount += amount;
            }
            if let Some(discount) = record.discount_amount() {
                total_discount += discount;
            }
        }

        SummaryResult {
            total_units_sold,
            total_amount,
            total_discount,
            total_sales_records: ids.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Record {
                quantity: Some(5),
                total_amount: Some(dec("21340")),
                discount_percentage: Some(dec("12")),
                ..Record::new(1)
            },
            Record {
                quantity: Some(2),
                total_amount: Some(dec("0.10")),
                discount_percentage: Some(dec("10")),
                ..Record::new(2)
            },
            Record {
                quantity: None,
                total_amount: Some(dec("0.20")),
                discount_percentage: None,
                ..Record::new(3)
            },
        ])
    }

    #[test]
    fn test_sums_all_records() {
        let dataset = dataset();
        let ids: Vec<RecordId> = dataset.ids().collect();
        let summary = Aggregator::aggregate(&dataset, &ids);

        assert_eq!(summary.total_sales_records, 3);
        assert_eq!(summary.total_units_sold, 7);
        assert_eq!(summary.total_amount, dec("21340.30"));
        assert_eq!(summary.total_discount, dec("2560.81"));
    }

    #[test]
    fn test_sums_are_exact() {
        let dataset = dataset();
        let summary = Aggregator::aggregate(&dataset, &[1, 2]);
        // 0.1 + 0.2 stays exactly 0.3
        assert_eq!(summary.total_amount, dec("0.3"));
    }

    #[test]
    fn test_empty_selection() {
        let summary = Aggregator::aggregate(&dataset(), &[]);
        assert_eq!(summary, SummaryResult::default());
    }
}
