use std::collections::HashSet;

use crate::record::Record;

/// Append-only merge of freshly fetched records onto the persisted ones.
///
/// Everything in `existing` is kept as-is. A fresh record is appended only if
/// its `(year, pID)` has not been seen yet, so the persisted copy always beats
/// a refetched one and the first fresh copy beats later ones.
pub fn merge(existing: &[Record], fresh: &[Record]) -> Vec<Record> {
    let mut seen: HashSet<(&str, &str)> = existing.iter().map(Record::key).collect();
    let mut merged = existing.to_vec();

    for record in fresh {
        if seen.insert(record.key()) {
            merged.push(record.clone());
        }
    }

    merged
}

/// Stable sort by `(year, pID)` as strings, so "19" < "2".
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(|a, b| a.key().cmp(&b.key()));
}
