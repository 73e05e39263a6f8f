//! Predicate filtering for query execution
//!
//! Scans the dataset once in dataset order and keeps the ids of matching
//! records. The dataset is never modified.

use crate::dataset::{Dataset, RecordId};
use crate::query::RecordPredicate;

/// Evaluates record predicates against a dataset
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Returns the ids of all records matching `predicate`, in dataset order
    pub fn evaluate(dataset: &Dataset, predicate: &RecordPredicate) -> Vec<RecordId> {
        if predicate.is_unconstrained() {
            return dataset.ids().collect();
        }

        dataset
            .iter()
            .filter(|(_, record)| predicate.matches(record))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use crate::query::{Criteria, Filter, MembershipField, PredicateBuilder};

    fn dataset() -> Dataset {
        let regions = ["north", "south", "north", "east"];
        regions
            .iter()
            .enumerate()
            .map(|(i, region)| Record {
                customer_region: region.to_string(),
                ..Record::new(i as u64 + 1)
            })
            .collect()
    }

    #[test]
    fn test_unconstrained_returns_all() {
        let ids = FilterEvaluator::evaluate(&dataset(), &RecordPredicate::match_all());
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_preserves_dataset_order() {
        let criteria = Criteria::new().with_filter(Filter::membership(
            MembershipField::CustomerRegion,
            ["North", "East"],
        ));
        let ids = FilterEvaluator::evaluate(&dataset(), &PredicateBuilder::build(&criteria));
        assert_eq!(ids, vec![0, 2, 3]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let criteria = Criteria::new().with_filter(Filter::membership(
            MembershipField::CustomerRegion,
            ["west"],
        ));
        let ids = FilterEvaluator::evaluate(&dataset(), &PredicateBuilder::build(&criteria));
        assert!(ids.is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let ids = FilterEvaluator::evaluate(&Dataset::default(), &RecordPredicate::match_all());
        assert!(ids.is_empty());
    }
}
