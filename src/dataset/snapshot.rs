//! Immutable in-memory dataset
//!
//! The dataset is an arena of records addressed by [`RecordId`]. Every query
//! stage passes record ids around instead of copying records, so the arena
//! itself is never touched after construction.

use std::ops::Range;
use std::sync::Arc;

use super::record::Record;

/// Position of a record in the dataset (0..N-1)
pub type RecordId = usize;

/// Read-only snapshot of all sales transactions
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset from records in their canonical order
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Creates a dataset wrapped in a shareable handle
    pub fn shared(records: Vec<Record>) -> Arc<Self> {
        Arc::new(Self::new(records))
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `id`, if any
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id)
    }

    /// Returns the record at `id`.
    ///
    /// Ids handed out by the executor always come from this dataset, so an
    /// out-of-range id is a programming error and panics.
    pub fn record(&self, id: RecordId) -> &Record {
        &self.records[id]
    }

    /// All record ids in dataset order
    pub fn ids(&self) -> Range<RecordId> {
        0..self.records.len()
    }

    /// Iterates `(id, record)` pairs in dataset order
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Record)> {
        self.records.iter().enumerate()
    }

    /// All records in dataset order
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_insertion_order() {
        let dataset: Dataset = (10..13).map(Record::new).collect();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.ids(), 0..3);
        assert_eq!(dataset.record(0).transaction_id, 10);
        assert_eq!(dataset.record(2).transaction_id, 12);
        assert!(dataset.get(3).is_none());
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.iter().count(), 0);
    }
}
