//! Predicate construction
//!
//! Translates validated [`Criteria`] into a [`RecordPredicate`]: a search
//! clause plus one clause per effective filter, all combined with AND.
//!
//! Normalization happens here, once per query, so evaluation only compares
//! prepared values:
//!
//! - The search term is trimmed and lowercased; blank terms are dropped
//! - Membership values are trimmed and lowercased, empty values removed
//! - A membership filter left with no values is no constraint at all

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::dataset::Record;

use super::ast::{Criteria, Filter, MembershipField};

/// Case-insensitive substring search over the searchable record fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    /// Trimmed, lowercased term
    term: String,
    /// Digits of a phone-like term, empty otherwise
    digits: String,
}

impl SearchPredicate {
    /// Builds a search predicate, or `None` for a blank term
    pub fn new(term: &str) -> Option<Self> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }
        let digits = if is_phone_like(&term) {
            term.chars().filter(|c| c.is_ascii_digit()).collect()
        } else {
            String::new()
        };
        Some(Self { term, digits })
    }

    /// The normalized term
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn matches(&self, record: &Record) -> bool {
        let text_fields = [
            &record.customer_name,
            &record.customer_id,
            &record.product_id,
            &record.product_name,
            &record.employee_name,
            &record.store_id,
            &record.store_location,
            &record.brand,
            &record.customer_type,
            &record.order_status,
            &record.delivery_type,
        ];

        if text_fields.iter().any(|field| self.contained_in(field)) {
            return true;
        }

        self.matches_transaction_id(record.transaction_id) || self.matches_phone(record)
    }

    fn contained_in(&self, value: &str) -> bool {
        !value.is_empty() && value.to_lowercase().contains(&self.term)
    }

    fn matches_transaction_id(&self, id: u64) -> bool {
        let id = id.to_string();
        id.contains(&self.term) || (!self.digits.is_empty() && id.contains(&self.digits))
    }

    /// Raw phone substring, or digits-only comparison so that separators
    /// and country-code formatting do not matter
    fn matches_phone(&self, record: &Record) -> bool {
        if self.contained_in(&record.phone_number) {
            return true;
        }
        !self.digits.is_empty() && record.phone_digits().contains(&self.digits)
    }
}

/// A single normalized filter clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Record value must be in `values`
    Membership {
        field: MembershipField,
        values: BTreeSet<String>,
    },
    /// Inclusive age bounds
    AgeRange { min: Option<u32>, max: Option<u32> },
    /// Inclusive lower date bound
    DateFrom(NaiveDate),
}

impl Clause {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Clause::Membership { field, values } => match field {
                MembershipField::Tags => record
                    .tags
                    .iter()
                    .any(|tag| values.contains(&normalize_value(tag))),
                MembershipField::CustomerRegion => {
                    values.contains(&normalize_value(&record.customer_region))
                }
                MembershipField::Gender => values.contains(&normalize_value(&record.gender)),
                MembershipField::ProductCategory => {
                    values.contains(&normalize_value(&record.product_category))
                }
                MembershipField::PaymentMethod => {
                    values.contains(&normalize_value(&record.payment_method))
                }
            },
            Clause::AgeRange { min, max } => match record.age {
                Some(age) => {
                    min.map_or(true, |min| age >= min) && max.map_or(true, |max| age <= max)
                }
                None => false,
            },
            Clause::DateFrom(from) => record.date.map_or(false, |date| date >= *from),
        }
    }
}

/// Conjunction of an optional search and zero or more clauses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPredicate {
    search: Option<SearchPredicate>,
    clauses: Vec<Clause>,
}

impl RecordPredicate {
    /// Predicate that matches every record
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Returns true if the predicate imposes no constraint
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_none() && self.clauses.is_empty()
    }

    pub fn search(&self) -> Option<&SearchPredicate> {
        self.search.as_ref()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Evaluates the predicate against a record.
    ///
    /// A record missing a field a clause needs does not match that clause.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(search) = &self.search {
            if !search.matches(record) {
                return false;
            }
        }
        self.clauses.iter().all(|clause| clause.matches(record))
    }
}

/// Builds record predicates from query criteria
pub struct PredicateBuilder;

impl PredicateBuilder {
    /// Builds the predicate for already-validated criteria
    pub fn build(criteria: &Criteria) -> RecordPredicate {
        let search = criteria.search.as_deref().and_then(SearchPredicate::new);

        let clauses = criteria
            .filters
            .iter()
            .filter_map(Self::clause_for)
            .collect();

        RecordPredicate { search, clauses }
    }

    fn clause_for(filter: &Filter) -> Option<Clause> {
        match filter {
            Filter::Membership { field, values } => {
                let values: BTreeSet<String> = values
                    .iter()
                    .map(|value| normalize_value(value))
                    .filter(|value| !value.is_empty())
                    .collect();
                if values.is_empty() {
                    None
                } else {
                    Some(Clause::Membership {
                        field: *field,
                        values,
                    })
                }
            }
            Filter::AgeRange { min: None, max: None } => None,
            Filter::AgeRange { min, max } => Some(Clause::AgeRange {
                min: *min,
                max: *max,
            }),
            Filter::DateFrom(date) => Some(Clause::DateFrom(*date)),
        }
    }
}

/// Digits plus phone punctuation (`+`, space, `-`, `.`, parentheses) only
fn is_phone_like(term: &str) -> bool {
    term.chars().any(|c| c.is_ascii_digit())
        && term
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.' | '(' | ')'))
}

fn normalize_value(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            customer_name: "Neha Khan".into(),
            phone_number: "+91 98765 43210".into(),
            gender: "female".into(),
            age: Some(30),
            customer_region: "north".into(),
            tags: vec!["organic".into(), "skincare".into()],
            date: NaiveDate::from_ymd_opt(2023, 5, 1),
            ..Record::new(1042)
        }
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let predicate = PredicateBuilder::build(&Criteria::new().with_search("   "));
        assert!(predicate.is_unconstrained());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let predicate = PredicateBuilder::build(&Criteria::new().with_search(" NEHA "));
        assert!(predicate.matches(&record()));
    }

    #[test]
    fn test_search_phone_formats() {
        for term in ["+91 98765", "9876543210", "987", "98765 43210"] {
            let predicate = PredicateBuilder::build(&Criteria::new().with_search(term));
            assert!(predicate.matches(&record()), "term {:?} should match", term);
        }
    }

    #[test]
    fn test_mixed_term_does_not_match_on_digits_alone() {
        // phone and id both contain 1, but "zzz1" is not a phone number
        let predicate = PredicateBuilder::build(&Criteria::new().with_search("zzz1"));
        assert!(!predicate.matches(&record()));

        let predicate = PredicateBuilder::build(&Criteria::new().with_search("(987) 65-43"));
        assert!(predicate.matches(&record()));
    }

    #[test]
    fn test_search_transaction_id() {
        let predicate = PredicateBuilder::build(&Criteria::new().with_search("104"));
        assert!(predicate.matches(&record()));

        let predicate = PredicateBuilder::build(&Criteria::new().with_search("zzz"));
        assert!(!predicate.matches(&record()));
    }

    #[test]
    fn test_membership_normalizes_values() {
        let criteria = Criteria::new().with_filter(Filter::membership(
            MembershipField::Gender,
            [" FEMALE ", ""],
        ));
        let predicate = PredicateBuilder::build(&criteria);
        assert_eq!(predicate.clauses().len(), 1);
        assert!(predicate.matches(&record()));
    }

    #[test]
    fn test_empty_membership_is_no_constraint() {
        let criteria = Criteria::new()
            .with_filter(Filter::membership(MembershipField::CustomerRegion, ["", "  "]))
            .with_filter(Filter::membership(MembershipField::Tags, Vec::<String>::new()));
        assert!(PredicateBuilder::build(&criteria).is_unconstrained());
    }

    #[test]
    fn test_tags_match_any() {
        let criteria = Criteria::new().with_filter(Filter::membership(
            MembershipField::Tags,
            ["wireless", "Organic"],
        ));
        assert!(PredicateBuilder::build(&criteria).matches(&record()));

        let criteria =
            Criteria::new().with_filter(Filter::membership(MembershipField::Tags, ["wireless"]));
        assert!(!PredicateBuilder::build(&criteria).matches(&record()));
    }

    #[test]
    fn test_age_range_requires_age() {
        let clause = Clause::AgeRange {
            min: Some(25),
            max: Some(35),
        };
        assert!(clause.matches(&record()));

        let without_age = Record {
            age: None,
            ..record()
        };
        assert!(!clause.matches(&without_age));

        let open_min = Clause::AgeRange {
            min: None,
            max: Some(30),
        };
        assert!(open_min.matches(&record()));
    }

    #[test]
    fn test_date_from_is_inclusive() {
        let day = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        assert!(Clause::DateFrom(day).matches(&record()));
        assert!(!Clause::DateFrom(day.succ_opt().unwrap()).matches(&record()));

        let undated = Record {
            date: None,
            ..record()
        };
        assert!(!Clause::DateFrom(day).matches(&undated));
    }

    #[test]
    fn test_search_and_filters_are_anded() {
        let criteria = Criteria::new()
            .with_search("neha")
            .with_filter(Filter::membership(MembershipField::CustomerRegion, ["south"]));
        assert!(!PredicateBuilder::build(&criteria).matches(&record()));
    }
}
