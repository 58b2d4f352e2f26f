//! Pruned BFS lookup engine: `lookup(input, verbosity, max_edit_distance)`.
//!
//! Starting from the query's prefix, the engine enumerates deletes breadth-first (non-decreasing
//! deletion count `Δ`), looks each one up in the delete index, and revalidates every candidate
//! source term with cheap length/prefix prunes before falling back to bounded OSA distance. The
//! queue's BFS order is what lets `Top`/`Closest` stop early once `Δ` exceeds the current best.

use std::collections::{HashSet, VecDeque};

use crate::distance::distance_osa;
use crate::error::{Result, SymSpellError};
use crate::hashing::delete_hash;
use crate::index::DeleteIndex;
use crate::suggestion::{Suggestion, Verbosity, sort_suggestions};
use crate::vocabulary::VocabularyStore;

/// Runs the pruned BFS lookup against `vocab`/`index`.
///
/// `compact_mask` and `prefix_length` must match the values the index was built with;
/// `max_dictionary_edit_distance` is the construction-time ceiling `K` that bounds
/// `max_edit_distance`.
#[allow(clippy::too_many_arguments)]
pub fn lookup(
    vocab: &VocabularyStore,
    index: &DeleteIndex,
    compact_mask: u32,
    prefix_length: usize,
    max_dictionary_edit_distance: u32,
    input: &str,
    verbosity: Verbosity,
    max_edit_distance: u32,
    include_unknown: bool,
) -> Result<Vec<Suggestion>> {
    if max_edit_distance > max_dictionary_edit_distance {
        return Err(SymSpellError::EditDistanceOutOfRange {
            requested: max_edit_distance,
            max: max_dictionary_edit_distance,
        });
    }

    let input_chars: Vec<char> = input.chars().collect();
    let input_len = input_chars.len();

    if (input_len as i64) - (max_edit_distance as i64) > vocab.max_length() as i64 {
        return Ok(Vec::new());
    }

    let mut results: Vec<Suggestion> = Vec::new();

    if let Some(count) = vocab.count(input) {
        results.push(Suggestion::new(input, 0, count));
        if verbosity != Verbosity::All {
            return Ok(results);
        }
    }

    if max_edit_distance == 0 {
        return finalize(results, input, max_edit_distance, include_unknown);
    }

    let input_prefix_len = input_len.min(prefix_length);
    let input_prefix: String = input_chars[..input_prefix_len].iter().collect();

    let mut seen_deletes: HashSet<String> = HashSet::new();
    seen_deletes.insert(input_prefix.clone());
    let mut queue: VecDeque<String> = VecDeque::new();
    queue.push_back(input_prefix);

    let mut seen_suggestions: HashSet<String> = HashSet::new();
    let mut best_distance: i64 = max_edit_distance as i64;

    while let Some(candidate) = queue.pop_front() {
        let candidate_chars: Vec<char> = candidate.chars().collect();
        let candidate_len = candidate_chars.len();
        let delta = input_prefix_len as i64 - candidate_len as i64;

        if delta > best_distance {
            if verbosity != Verbosity::All {
                break;
            }
            continue;
        }

        let hash = delete_hash(&candidate, compact_mask);
        if let Some(bucket) = index.get(hash) {
            for s in bucket {
                if s == input {
                    continue;
                }
                let s_len = s.chars().count();

                if (s_len as i64 - input_len as i64).abs() > best_distance {
                    continue;
                }
                if s_len < candidate_len {
                    continue;
                }
                if s_len == candidate_len && s.as_str() != candidate.as_str() {
                    continue;
                }

                let sugg_prefix_len = s_len.min(prefix_length);
                if sugg_prefix_len > input_prefix_len
                    && (sugg_prefix_len as i64 - candidate_len as i64) > best_distance
                {
                    continue;
                }

                if !seen_suggestions.insert(s.clone()) {
                    continue;
                }

                let distance: i64 = if candidate_len == 0 {
                    input_len.max(s_len) as i64
                } else if s_len == 1 {
                    let only_char = s.chars().next().unwrap();
                    if input.chars().any(|c| c == only_char) {
                        (input_len as i64) - 1
                    } else {
                        input_len as i64
                    }
                } else {
                    let s_prefix: Vec<char> = s.chars().take(prefix_length).collect();
                    if !is_ordered_subsequence(&candidate_chars, &s_prefix) {
                        continue;
                    }
                    match distance_osa(input, s, best_distance as u32) {
                        Some(d) => d as i64,
                        None => continue,
                    }
                };

                if distance > best_distance {
                    continue;
                }

                let count = vocab.count(s).unwrap_or(0);
                let suggestion = Suggestion::new(s.clone(), distance as u32, count);

                match verbosity {
                    Verbosity::Top => {
                        if let Some(current) = results.first() {
                            if distance < current.distance as i64
                                || (distance == current.distance as i64 && count > current.count)
                            {
                                results[0] = suggestion;
                                best_distance = distance;
                            }
                        } else {
                            results.push(suggestion);
                            best_distance = distance;
                        }
                    }
                    Verbosity::Closest => {
                        if distance < best_distance {
                            results.clear();
                            best_distance = distance;
                        }
                        results.push(suggestion);
                    }
                    Verbosity::All => {
                        results.push(suggestion);
                    }
                }
            }
        }

        let can_expand = match verbosity {
            Verbosity::All => delta < max_edit_distance as i64,
            _ => delta < max_edit_distance as i64 && delta < best_distance,
        };

        if can_expand && candidate_len <= prefix_length && candidate_len > 0 {
            for i in 0..candidate_chars.len() {
                let mut next = String::with_capacity(candidate.len());
                next.extend(candidate_chars[..i].iter());
                next.extend(candidate_chars[i + 1..].iter());
                if seen_deletes.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }
    }

    finalize(results, input, max_edit_distance, include_unknown)
}

fn finalize(
    mut results: Vec<Suggestion>,
    input: &str,
    max_edit_distance: u32,
    include_unknown: bool,
) -> Result<Vec<Suggestion>> {
    sort_suggestions(&mut results);
    if results.is_empty() && include_unknown {
        results.push(Suggestion::new(input, max_edit_distance + 1, 0));
    }
    Ok(results)
}

/// Hash-collision guard: do `needle`'s characters appear, in order, within `haystack` (the
/// first `prefix_length` characters of a candidate source term)?
fn is_ordered_subsequence(needle: &[char], haystack: &[char]) -> bool {
    let mut hay = haystack.iter();
    for &nc in needle {
        loop {
            match hay.next() {
                Some(&hc) if hc == nc => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::compact_mask;

    fn build(entries: &[(&str, i64)], prefix_length: usize, max_ed: u32) -> (VocabularyStore, DeleteIndex, u32) {
        let mut vocab = VocabularyStore::new(1);
        let mut index = DeleteIndex::new();
        let mask = compact_mask(8);
        for (term, count) in entries {
            vocab.upsert(term, *count);
            for d in crate::deletes::edits_prefix(term, prefix_length, max_ed as usize) {
                index.add_reverse_edge(delete_hash(&d, mask), term);
            }
        }
        (vocab, index, mask)
    }

    #[test]
    fn exact_match_top_returns_itself() {
        let (vocab, index, mask) = build(&[("hello", 100)], 7, 2);
        let result = lookup(&vocab, &index, mask, 7, 2, "hello", Verbosity::Top, 0, false).unwrap();
        assert_eq!(result, vec![Suggestion::new("hello", 0, 100)]);
    }

    #[test]
    fn shared_prefix_counts_all() {
        let (vocab, index, mask) = build(&[("pipe", 5), ("pips", 10)], 7, 1);
        let mut r = lookup(&vocab, &index, mask, 7, 1, "pipe", Verbosity::All, 1, false).unwrap();
        r.sort_by(|a, b| a.term.cmp(&b.term));
        assert_eq!(r.len(), 2);

        let r2 = lookup(&vocab, &index, mask, 7, 1, "pip", Verbosity::All, 1, false).unwrap();
        assert_eq!(r2.len(), 2);
        assert_eq!(r2[0].term, "pips");
        assert_eq!(r2[1].term, "pipe");
    }

    #[test]
    fn verbosity_widens_result_set() {
        let (vocab, index, mask) = build(&[("steam", 1), ("steams", 2), ("steem", 3)], 7, 2);
        let top = lookup(&vocab, &index, mask, 7, 2, "steems", Verbosity::Top, 2, false).unwrap();
        let closest = lookup(&vocab, &index, mask, 7, 2, "steems", Verbosity::Closest, 2, false).unwrap();
        let all = lookup(&vocab, &index, mask, 7, 2, "steems", Verbosity::All, 2, false).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(closest.len(), 2);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn top_prefers_frequency_on_tied_distance() {
        let (vocab, index, mask) = build(
            &[("steama", 4), ("steamb", 6), ("steamc", 2)],
            7,
            2,
        );
        let top = lookup(&vocab, &index, mask, 7, 2, "steam", Verbosity::Top, 2, false).unwrap();
        assert_eq!(top, vec![Suggestion::new("steamb", 1, 6)]);
    }

    #[test]
    fn out_of_range_max_edit_distance_errors() {
        let (vocab, index, mask) = build(&[("hello", 1)], 7, 2);
        let err = lookup(&vocab, &index, mask, 7, 2, "helo", Verbosity::Top, 3, false);
        assert!(err.is_err());
    }

    #[test]
    fn include_unknown_returns_sentinel_when_empty() {
        let (vocab, index, mask) = build(&[("hello", 1)], 7, 2);
        let r = lookup(&vocab, &index, mask, 7, 2, "zzz", Verbosity::Top, 1, true).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].term, "zzz");
        assert_eq!(r[0].distance, 2);
        assert_eq!(r[0].count, 0);
    }

    #[test]
    fn threshold_suppression_hides_pending_terms() {
        let mut vocab = VocabularyStore::new(10);
        let mut index = DeleteIndex::new();
        let mask = compact_mask(8);
        vocab.upsert("pawn", 1);
        let r = lookup(&vocab, &index, mask, 7, 0, "pawn", Verbosity::Top, 0, false).unwrap();
        assert!(r.is_empty());

        vocab.upsert("flame", 20);
        for d in crate::deletes::edits_prefix("flame", 7, 0) {
            index.add_reverse_edge(delete_hash(&d, mask), "flame");
        }
        vocab.upsert("flam", 1);
        let r2 = lookup(&vocab, &index, mask, 7, 0, "flam", Verbosity::Top, 0, false).unwrap();
        assert!(r2.is_empty());
    }
}
