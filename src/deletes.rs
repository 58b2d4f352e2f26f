//! Delete generator: `EditsPrefix(k)`.
//!
//! Produces the set of strings reachable by deleting up to `max_distance` characters from the
//! `prefix_len`-character prefix of a term, plus the term's prefix itself and (when the full
//! term is short enough) the empty string. Purely language-independent: no inserts, replaces
//! or transposes, only deletions, bounded to a prefix rather than the whole term.

use std::collections::HashSet;

/// Computes `EditsPrefix(term)`: the delete-prefix set used to seed the delete index for one
/// vocabulary term.
pub fn edits_prefix(term: &str, prefix_len: usize, max_distance: usize) -> HashSet<String> {
    let chars: Vec<char> = term.chars().collect();
    let kp_len = chars.len().min(prefix_len);
    let kp: String = chars[..kp_len].iter().collect();

    let mut seen = HashSet::new();
    seen.insert(kp.clone());
    if chars.len() <= max_distance {
        seen.insert(String::new());
    }

    if max_distance == 0 {
        return seen;
    }

    let mut frontier = vec![kp];
    for _ in 0..max_distance {
        let mut next = Vec::new();
        for s in &frontier {
            let s_chars: Vec<char> = s.chars().collect();
            for i in 0..s_chars.len() {
                let mut t = String::with_capacity(s.len());
                t.extend(s_chars[..i].iter());
                t.extend(s_chars[i + 1..].iter());
                if seen.insert(t.clone()) {
                    next.push(t);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    seen
}
