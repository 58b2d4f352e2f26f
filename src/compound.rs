//! Compound corrector: `lookup_compound(input, max_edit_distance)`.
//!
//! Walks the tokenised input left-to-right, at each token trying (in order) an adjacent-pair
//! merge, a zero-distance/single-char accept, then an intra-token split, scoring splits against
//! the bigram dictionary when available and falling back to a Naive-Bayes product otherwise.

use std::collections::HashMap;

use crate::dictionary::tokenize;
use crate::suggestion::Suggestion;

#[derive(Debug, Clone)]
struct Part {
    term: String,
    distance: u32,
    count: f64,
}

/// Performs `lookup_compound`. `lookup_top` must already be bounded to `max_edit_distance` and
/// `Verbosity::Top`; `distance_bounded` computes OSA distance with the given bound, `None` when
/// it's exceeded. Both are injected so this module stays free of any direct dependency on the
/// vocabulary/index internals. It only needs single-term lookups and a distance function.
pub fn lookup_compound(
    input: &str,
    max_edit_distance: u32,
    lookup_top: &dyn Fn(&str) -> Option<Suggestion>,
    distance_bounded: &dyn Fn(&str, &str, u32) -> Option<u32>,
    bigrams: &HashMap<String, i64>,
    bigram_count_min: i64,
    n: i64,
) -> Suggestion {
    let (parts, _tokens) = walk_tokens(input, max_edit_distance, lookup_top, distance_bounded, bigrams, bigram_count_min, n);
    assemble(input, &parts, distance_bounded, n)
}

fn walk_tokens(
    input: &str,
    max_edit_distance: u32,
    lookup_top: &dyn Fn(&str) -> Option<Suggestion>,
    distance_bounded: &dyn Fn(&str, &str, u32) -> Option<u32>,
    bigrams: &HashMap<String, i64>,
    bigram_count_min: i64,
    n: i64,
) -> (Vec<Part>, Vec<String>) {
    let tokens = tokenize(input);
    let n_f = n as f64;
    let mut parts: Vec<Part> = Vec::with_capacity(tokens.len());
    let mut last_combi = false;

    for (i, token) in tokens.iter().enumerate() {
        let best_i = lookup_top(token);
        let best_i_part = match &best_i {
            Some(s) => Part {
                term: s.term.clone(),
                distance: s.distance,
                count: s.count as f64,
            },
            None => {
                let estimated = 10.0 / 10f64.powi(token.chars().count() as i32);
                Part {
                    term: token.clone(),
                    distance: max_edit_distance + 1,
                    count: estimated,
                }
            }
        };

        if i > 0 && !last_combi {
            if let Some(merged) = try_merge(
                &tokens[i - 1],
                token,
                parts.last().unwrap(),
                &best_i_part,
                lookup_top,
                n_f,
            ) {
                let last_idx = parts.len() - 1;
                parts[last_idx] = merged;
                last_combi = true;
                continue;
            }
        }
        last_combi = false;

        if best_i.is_some() && (best_i_part.distance == 0 || token.chars().count() == 1) {
            parts.push(best_i_part);
            continue;
        }

        match best_split(token, max_edit_distance, &best_i, lookup_top, distance_bounded, bigrams, bigram_count_min, n_f) {
            Some(split)
                if split.distance < best_i_part.distance
                    || (split.distance == best_i_part.distance && split.count > best_i_part.count) =>
            {
                parts.push(split);
            }
            _ => parts.push(best_i_part),
        }
    }

    (parts, tokens)
}

fn try_merge(
    prev_token: &str,
    token: &str,
    prev_part: &Part,
    best_i_part: &Part,
    lookup_top: &dyn Fn(&str) -> Option<Suggestion>,
    n_f: f64,
) -> Option<Part> {
    let merged_term = format!("{prev_token}{token}");
    let combi = lookup_top(&merged_term)?;

    let d_sep = prev_part.distance + best_i_part.distance;
    let combi_distance = combi.distance + 1;

    let accept = combi_distance < d_sep
        || (combi_distance == d_sep && (combi.count as f64) > (prev_part.count / n_f) * best_i_part.count);

    if accept {
        Some(Part {
            term: combi.term,
            distance: combi_distance,
            count: combi.count as f64,
        })
    } else {
        None
    }
}

#[allow(clippy::too_many_arguments)]
fn best_split(
    token: &str,
    max_edit_distance: u32,
    best_i: &Option<Suggestion>,
    lookup_top: &dyn Fn(&str) -> Option<Suggestion>,
    distance_bounded: &dyn Fn(&str, &str, u32) -> Option<u32>,
    bigrams: &HashMap<String, i64>,
    bigram_count_min: i64,
    n_f: f64,
) -> Option<Part> {
    let token_chars: Vec<char> = token.chars().collect();
    if token_chars.len() < 2 {
        return None;
    }

    let mut best: Option<Part> = None;

    for j in 1..token_chars.len() {
        let p1: String = token_chars[..j].iter().collect();
        let p2: String = token_chars[j..].iter().collect();

        let (Some(s1), Some(s2)) = (lookup_top(&p1), lookup_top(&p2)) else {
            continue;
        };

        let cand_term = format!("{} {}", s1.term, s2.term);
        let cand_distance =
            distance_bounded(token, &cand_term, max_edit_distance).unwrap_or(max_edit_distance + 1);

        let cand_count: f64 = if let Some(&bigram_count) = bigrams.get(&cand_term) {
            let mut count = bigram_count as f64;
            if let Some(best_single) = best_i {
                let reconstructs_exactly = format!("{}{}", s1.term, s2.term) == *token;
                if reconstructs_exactly {
                    count = count.max(best_single.count as f64 + 2.0);
                } else if s1.term == best_single.term || s2.term == best_single.term {
                    count = count.max(best_single.count as f64 + 1.0);
                }
            }
            count
        } else {
            (bigram_count_min as f64).min((s1.count as f64 / n_f) * s2.count as f64)
        };

        let candidate = Part {
            term: cand_term,
            distance: cand_distance,
            count: cand_count,
        };

        let better = match &best {
            None => true,
            Some(current) => {
                candidate.distance < current.distance
                    || (candidate.distance == current.distance && candidate.count > current.count)
            }
        };
        if better {
            best = Some(candidate);
        }
    }

    best
}

fn assemble(
    input: &str,
    parts: &[Part],
    distance_bounded: &dyn Fn(&str, &str, u32) -> Option<u32>,
    n: i64,
) -> Suggestion {
    if parts.is_empty() {
        return Suggestion::new(input, 0, 0);
    }

    let joined = parts.iter().map(|p| p.term.as_str()).collect::<Vec<_>>().join(" ");
    let n_f = n as f64;

    let mut aggregate_count = n_f;
    for part in parts {
        aggregate_count *= part.count / n_f;
    }

    let final_distance = distance_bounded(input, &joined, u32::MAX).unwrap_or(u32::MAX);

    Suggestion::new(joined, final_distance, aggregate_count as i64)
}
