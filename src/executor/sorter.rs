//! Result sorting for query execution
//!
//! Orders record ids by one key, deterministically:
//!
//! - `date` is chronological, `quantity` numeric
//! - `customer_name` compares lowercased names
//! - `desc` reverses the key comparison
//! - Equal keys keep dataset order in both directions (stable sort)
//! - Records without a key (no date, no quantity, empty name) sort after
//!   every record that has one

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::dataset::{Dataset, Record, RecordId};
use crate::query::{SortDirection, SortField, SortSpec};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Date(NaiveDate),
    Quantity(u32),
    Name(String),
}

impl SortKey {
    fn of(record: &Record, field: SortField) -> Option<Self> {
        match field {
            SortField::Date => record.date.map(SortKey::Date),
            SortField::Quantity => record.quantity.map(SortKey::Quantity),
            SortField::CustomerName if record.customer_name.is_empty() => None,
            SortField::CustomerName => Some(SortKey::Name(record.customer_name.to_lowercase())),
        }
    }
}

/// Sorts record ids
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts ids according to the sort specification.
    ///
    /// Keys are computed once per record before sorting.
    pub fn sort(dataset: &Dataset, ids: &mut [RecordId], sort_spec: &SortSpec) {
        let mut keyed: Vec<(Option<SortKey>, RecordId)> = ids
            .iter()
            .map(|&id| (SortKey::of(dataset.record(id), sort_spec.field), id))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| Self::compare_keys(a.as_ref(), b.as_ref(), sort_spec.direction));

        for (slot, (_, id)) in ids.iter_mut().zip(keyed) {
            *slot = id;
        }
    }

    /// Compares two optional keys; missing keys are greater in both directions
    fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, direction: SortDirection) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a_key), Some(b_key)) => {
                let ordering = a_key.cmp(b_key);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }
}
