//! Distinct filter values
//!
//! Lists the values each membership filter can take, drawn from the whole
//! dataset and independent of any query.

use std::collections::BTreeSet;

use crate::dataset::Dataset;
use crate::query::MembershipField;

/// Sorted distinct non-empty values per filterable field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub customer_regions: Vec<String>,
    pub genders: Vec<String>,
    pub product_categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
}

impl FilterOptions {
    /// Collects the distinct values present in `dataset`
    pub fn collect(dataset: &Dataset) -> Self {
        let mut regions = BTreeSet::new();
        let mut genders = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut tags = BTreeSet::new();
        let mut payments = BTreeSet::new();

        for (_, record) in dataset.iter() {
            insert_value(&mut regions, &record.customer_region);
            insert_value(&mut genders, &record.gender);
            insert_value(&mut categories, &record.product_category);
            insert_value(&mut payments, &record.payment_method);
            for tag in &record.tags {
                insert_value(&mut tags, tag);
            }
        }

        Self {
            customer_regions: regions.into_iter().collect(),
            genders: genders.into_iter().collect(),
            product_categories: categories.into_iter().collect(),
            tags: tags.into_iter().collect(),
            payment_methods: payments.into_iter().collect(),
        }
    }

    /// Values for one membership field
    pub fn values(&self, field: MembershipField) -> &[String] {
        match field {
            MembershipField::CustomerRegion => &self.customer_regions,
            MembershipField::Gender => &self.genders,
            MembershipField::ProductCategory => &self.product_categories,
            MembershipField::Tags => &self.tags,
            MembershipField::PaymentMethod => &self.payment_methods,
        }
    }
}

fn insert_value(set: &mut BTreeSet<String>, value: &str) {
    let value = value.trim().to_lowercase();
    if !value.is_empty() {
        set.insert(value);
    }
}
