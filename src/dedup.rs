//! First-seen deduplication by planet name.

use std::collections::HashSet;

use crate::record::{Dataset, Record};

/// Keeps the first record for each distinct `key`, preserving input order.
pub fn dedup_by_key<'a, I, F>(records: I, key: F) -> Vec<Record>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> &str,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(key(*record).to_string()))
        .cloned()
        .collect()
}

/// Deduplicates on the identity field (`pl_name`).
pub fn dedup_records<'a, I>(records: I) -> Vec<Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    dedup_by_key(records, Record::name)
}

pub fn dedup(dataset: &Dataset) -> Dataset {
    dataset.with_records(dedup_records(dataset.records()))
}
