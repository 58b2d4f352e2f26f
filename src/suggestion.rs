//! [`Suggestion`] and [`Verbosity`]: the shared result type and verbosity policy used by
//! `lookup`, `lookup_compound` and `word_segmentation`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::vocabulary::Frequency;

/// A single candidate correction: a term, its edit distance from the query, and its dictionary
/// frequency. Ordered ascending by distance, then descending by count; ties beyond
/// that are left to insertion order, per the ordering contract in the concurrency notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub term: String,
    pub distance: u32,
    pub count: Frequency,
}

impl Suggestion {
    pub fn new(term: impl Into<String>, distance: u32, count: Frequency) -> Self {
        Self {
            term: term.into(),
            distance,
            count,
        }
    }
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.count.cmp(&self.count))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Controls how many suggestions [`crate::SymSpell::lookup`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// At most one suggestion: among the smallest edit distance, the highest count.
    Top,
    /// Every suggestion tied at the smallest edit distance found, descending by count.
    Closest,
    /// Every suggestion within the requested max edit distance, ordered by `(distance, -count)`.
    All,
}

/// Sorts `suggestions` by ascending distance, then descending count, in place.
pub fn sort_suggestions(suggestions: &mut [Suggestion]) {
    suggestions.sort();
}
