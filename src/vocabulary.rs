//! Two-tier vocabulary store: an accepted map `V` plus a below-threshold
//! holding area `B`. A term only enters `V` once its accumulated count reaches
//! `count_threshold`; until then it sits in `B`, invisible to lookups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Term frequency. Modeled as `i64` (not `u64`); counts saturate at `i64::MAX` rather than
/// wrapping or panicking on overflow.
pub type Frequency = i64;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct VocabularyStore {
    accepted: HashMap<String, Frequency>,
    below_threshold: HashMap<String, Frequency>,
    count_threshold: Frequency,
    max_length: usize,
}

impl VocabularyStore {
    pub fn new(count_threshold: Frequency) -> Self {
        Self {
            accepted: HashMap::new(),
            below_threshold: HashMap::new(),
            count_threshold: count_threshold.max(0),
            max_length: 0,
        }
    }

    /// Adds `count` to `term`'s accumulated frequency, promoting it from `B` to `V` the moment
    /// the threshold is crossed. Returns `true` iff this call is the one that performed that
    /// first promotion (callers use this to know when to expand the delete index for `term`).
    pub fn upsert(&mut self, term: &str, count: Frequency) -> bool {
        if count <= 0 && self.count_threshold > 0 {
            return false;
        }

        if let Some(existing) = self.accepted.get_mut(term) {
            *existing = existing.saturating_add(count);
            return false;
        }

        if let Some(pending) = self.below_threshold.get_mut(term) {
            let total = pending.saturating_add(count);
            if total >= self.count_threshold {
                self.below_threshold.remove(term);
                self.accept(term.to_string(), total);
                return true;
            }
            *pending = total;
            return false;
        }

        if count < self.count_threshold {
            self.below_threshold.insert(term.to_string(), count);
            false
        } else {
            self.accept(term.to_string(), count);
            true
        }
    }

    fn accept(&mut self, term: String, count: Frequency) {
        self.max_length = self.max_length.max(term.chars().count());
        self.accepted.insert(term, count);
    }

    pub fn count(&self, term: &str) -> Option<Frequency> {
        self.accepted.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.accepted.contains_key(term)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn size(&self) -> usize {
        self.accepted.len()
    }

    pub fn pending_size(&self) -> usize {
        self.below_threshold.len()
    }

    /// Drops every below-threshold entry, releasing memory held for terms that never made it
    /// into the accepted vocabulary.
    pub fn purge_below_threshold(&mut self) -> usize {
        let dropped = self.below_threshold.len();
        self.below_threshold.clear();
        dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Frequency)> {
        self.accepted.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_above_threshold_promotes_immediately() {
        let mut store = VocabularyStore::new(1);
        assert!(store.upsert("cat", 5));
        assert_eq!(store.count("cat"), Some(5));
    }

    #[test]
    fn below_threshold_terms_stay_hidden_until_promoted() {
        let mut store = VocabularyStore::new(10);
        assert!(!store.upsert("pawn", 1));
        assert_eq!(store.count("pawn"), None);
        assert_eq!(store.pending_size(), 1);

        assert!(!store.upsert("pawn", 8));
        assert_eq!(store.count("pawn"), None);

        assert!(store.upsert("pawn", 1));
        assert_eq!(store.count("pawn"), Some(10));
        assert_eq!(store.pending_size(), 0);
    }

    #[test]
    fn repeated_insertion_saturates_at_i64_max() {
        let mut store = VocabularyStore::new(1);
        store.upsert("cat", i64::MAX - 1);
        store.upsert("cat", 10);
        assert_eq!(store.count("cat"), Some(i64::MAX));
    }

    #[test]
    fn non_positive_count_is_noop_when_threshold_positive() {
        let mut store = VocabularyStore::new(1);
        assert!(!store.upsert("cat", 0));
        assert_eq!(store.count("cat"), None);
    }

    #[test]
    fn second_upsert_on_accepted_term_does_not_report_promotion() {
        let mut store = VocabularyStore::new(1);
        assert!(store.upsert("cat", 5));
        assert!(!store.upsert("cat", 5));
        assert_eq!(store.count("cat"), Some(10));
    }

    #[test]
    fn max_length_tracks_longest_accepted_term() {
        let mut store = VocabularyStore::new(1);
        store.upsert("a", 1);
        store.upsert("abcdef", 1);
        store.upsert("ab", 1);
        assert_eq!(store.max_length(), 6);
    }

    #[test]
    fn purge_below_threshold_drops_pending_only() {
        let mut store = VocabularyStore::new(10);
        store.upsert("pawn", 1);
        store.upsert("flame", 20);
        assert_eq!(store.purge_below_threshold(), 1);
        assert_eq!(store.pending_size(), 0);
        assert_eq!(store.count("flame"), Some(20));
    }
}
