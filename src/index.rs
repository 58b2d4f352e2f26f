//! Delete index and its staging builder.
//!
//! "Hash + list of strings" is an interface, not a type choice: any structure with
//! cheap append-by-hash and cheap lookup-by-hash is a valid delete index. This one is a
//! `HashMap<u32, Vec<String>>` keyed by [`crate::hashing::delete_hash`]; collisions between
//! unrelated deletes are expected and filtered by the lookup engine, not here.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DeleteIndex {
    buckets: HashMap<u32, Vec<String>>,
}

impl DeleteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `term` to the bucket for `hash`. Append-only: no removal, no deduplication (a
    /// term may legitimately appear once per distinct delete that maps to the same hash, and
    /// duplicate appends are tolerated; equality checks at query time filter them).
    pub fn add_reverse_edge(&mut self, hash: u32, term: &str) {
        self.buckets.entry(hash).or_default().push(term.to_string());
    }

    pub fn get(&self, hash: u32) -> Option<&[String]> {
        self.buckets.get(&hash).map(Vec::as_slice)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

/// Batched insertion front-end for bulk dictionary loads. Staged edges are kept apart from the
/// live index so a large load doesn't repeatedly reallocate (and re-walk) buckets that already
/// hold entries; `commit_to` performs the single-shot merge, allocating one right-sized vector
/// per touched bucket.
#[derive(Debug, Default)]
pub struct StagingBuilder {
    staged: HashMap<u32, Vec<String>>,
}

impl StagingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// O(1) amortised. Duplicates are not deduplicated here; query-time filtering handles it.
    pub fn add(&mut self, hash: u32, term: &str) {
        self.staged.entry(hash).or_default().push(term.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Merges every staged bucket into `index`, allocating a final array of
    /// `existing.len() + staged.len()` per touched bucket. Single-shot: consumes `self`.
    pub fn commit_to(self, index: &mut DeleteIndex) {
        for (hash, staged_terms) in self.staged {
            match index.buckets.entry(hash) {
                Entry::Occupied(mut entry) => {
                    let existing = entry.get_mut();
                    let mut merged = Vec::with_capacity(existing.len() + staged_terms.len());
                    merged.append(existing);
                    merged.extend(staged_terms);
                    *existing = merged;
                }
                Entry::Vacant(entry) => {
                    entry.insert(staged_terms);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get_round_trip() {
        let mut index = DeleteIndex::new();
        index.add_reverse_edge(7, "hello");
        index.add_reverse_edge(7, "hell");
        assert_eq!(index.get(7), Some(&["hello".to_string(), "hell".to_string()][..]));
        assert_eq!(index.get(8), None);
    }

    #[test]
    fn staging_commit_merges_into_existing_bucket() {
        let mut index = DeleteIndex::new();
        index.add_reverse_edge(1, "alpha");

        let mut staging = StagingBuilder::new();
        staging.add(1, "beta");
        staging.add(2, "gamma");
        staging.commit_to(&mut index);

        assert_eq!(
            index.get(1),
            Some(&["alpha".to_string(), "beta".to_string()][..])
        );
        assert_eq!(index.get(2), Some(&["gamma".to_string()][..]));
    }

    #[test]
    fn staging_tolerates_duplicate_terms_in_a_bucket() {
        let mut staging = StagingBuilder::new();
        staging.add(3, "dup");
        staging.add(3, "dup");
        let mut index = DeleteIndex::new();
        staging.commit_to(&mut index);
        assert_eq!(index.get(3).unwrap().len(), 2);
    }
}
