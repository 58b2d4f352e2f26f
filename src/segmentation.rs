//! Word segmenter: inserts missing spaces into an unsegmented string using
//! an O(n) triangular-matrix DP kept in a ring buffer of length `max_segment_word_len`.

use unicode_normalization::UnicodeNormalization;

use crate::suggestion::Suggestion;

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationResult {
    pub segmented: String,
    pub corrected: String,
    pub distance_sum: u32,
    pub log_prob_sum: f64,
}

#[derive(Debug, Clone)]
struct Composition {
    segmented: String,
    corrected: String,
    distance_sum: u32,
    log_prob_sum: f64,
}

impl Composition {
    fn empty() -> Self {
        Self {
            segmented: String::new(),
            corrected: String::new(),
            distance_sum: 0,
            log_prob_sum: 0.0,
        }
    }
}

/// Performs `word_segmentation`. `lookup_top` must already be bounded to `max_edit_distance`
/// and `Verbosity::Top`; `n` is the probability-normalisation constant shared with the compound
/// corrector.
pub fn word_segmentation(
    input: &str,
    max_segment_word_len: usize,
    lookup_top: &dyn Fn(&str) -> Option<Suggestion>,
    n: i64,
) -> SegmentationResult {
    let normalized: String = input.nfkc().collect();
    let normalized: String = normalized.chars().filter(|&c| c != '-').collect();
    let chars: Vec<char> = normalized.chars().collect();

    if chars.is_empty() {
        return SegmentationResult {
            segmented: String::new(),
            corrected: String::new(),
            distance_sum: 0,
            log_prob_sum: 0.0,
        };
    }

    let max_segment_word_len = max_segment_word_len.max(1);
    let arr_size = max_segment_word_len.min(chars.len());
    let mut compositions: Vec<Composition> = (0..arr_size).map(|_| Composition::empty()).collect();
    let n_f = n as f64;

    let mut circular_index: isize = -1;

    for j in 0..chars.len() {
        let imax = (chars.len() - j).min(max_segment_word_len);
        for i in 1..=imax {
            let mut part_chars: Vec<char> = chars[j..j + i].to_vec();

            let separator_length: u32 = if part_chars.first().map(|c| c.is_whitespace()).unwrap_or(false) {
                part_chars.remove(0);
                0
            } else {
                1
            };

            let before_trim = part_chars.len();
            part_chars.retain(|c| !c.is_whitespace());
            let removed_internal_spaces = (before_trim - part_chars.len()) as u32;

            let part: String = part_chars.iter().collect();
            let lower_part = part.to_lowercase();

            let mut top_ed = removed_internal_spaces;
            let top_result: String;
            let top_log_prob: f64;

            match lookup_top(&lower_part) {
                Some(s) => {
                    top_result = preserve_leading_case(&part, &s.term);
                    top_ed += s.distance;
                    top_log_prob = (s.count as f64 / n_f).log10();
                }
                None => {
                    top_result = part.clone();
                    top_ed += part_chars.len() as u32;
                    top_log_prob = (10.0 / (n_f * 10f64.powi(part_chars.len() as i32))).log10();
                }
            }

            let destination = (i as isize + circular_index).rem_euclid(arr_size as isize) as usize;

            if j == 0 {
                compositions[destination] = Composition {
                    segmented: part,
                    corrected: top_result,
                    distance_sum: top_ed,
                    log_prob_sum: top_log_prob,
                };
            } else {
                let circ = circular_index.rem_euclid(arr_size as isize) as usize;
                let base = compositions[circ].clone();

                let candidate_distance = base.distance_sum + separator_length + top_ed;
                let candidate_log_prob = base.log_prob_sum + top_log_prob;
                let dest_distance = compositions[destination].distance_sum;
                let dest_log_prob = compositions[destination].log_prob_sum;

                let ties_modulo_one_space =
                    candidate_distance == dest_distance || base.distance_sum + top_ed == dest_distance;

                let should_replace = i == max_segment_word_len
                    || (ties_modulo_one_space && candidate_log_prob > dest_log_prob)
                    || candidate_distance < dest_distance;

                if should_replace {
                    compositions[destination] = Composition {
                        segmented: join_parts(&base.segmented, &part),
                        corrected: join_parts(&base.corrected, &top_result),
                        distance_sum: candidate_distance,
                        log_prob_sum: candidate_log_prob,
                    };
                }
            }
        }

        circular_index += 1;
        if circular_index >= arr_size as isize {
            circular_index = 0;
        }
    }

    let final_index = circular_index.rem_euclid(arr_size as isize) as usize;
    let result = &compositions[final_index];
    SegmentationResult {
        segmented: result.segmented.clone(),
        corrected: result.corrected.clone(),
        distance_sum: result.distance_sum,
        log_prob_sum: result.log_prob_sum,
    }
}

/// Glues punctuation/apostrophe-leading parts to the previous word without a space; everything
/// else gets a single space separator.
fn join_parts(base: &str, part: &str) -> String {
    if base.is_empty() {
        return part.to_string();
    }
    match part.chars().next() {
        Some(c) if !c.is_alphanumeric() => format!("{base}{part}"),
        _ => format!("{base} {part}"),
    }
}

fn preserve_leading_case(original: &str, suggestion: &str) -> String {
    match original.chars().next() {
        Some(c) if c.is_uppercase() => {
            let mut chars = suggestion.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
        _ => suggestion.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn dictionary() -> HashSet<&'static str> {
        [
            "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog",
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn segments_a_concatenated_sentence() {
        let dict = dictionary();
        let lookup = |term: &str| -> Option<Suggestion> {
            dict.contains(term).then(|| Suggestion::new(term, 0, 100))
        };
        let result = word_segmentation(
            "thequickbrownfoxjumpsoverthelazydog",
            20,
            &lookup,
            1_024_908_267_229,
        );
        assert_eq!(result.corrected, "the quick brown fox jumps over the lazy dog");
        assert_eq!(result.segmented, "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn idempotent_on_already_segmented_input_with_zero_edit_distance() {
        let dict = dictionary();
        let lookup = |term: &str| -> Option<Suggestion> {
            dict.contains(term).then(|| Suggestion::new(term, 0, 100))
        };
        let input = "the quick brown fox jumps over the lazy dog";
        let result = word_segmentation(input, 20, &lookup, 1_024_908_267_229);
        assert_eq!(result.corrected, input);
    }

    #[test]
    fn preserves_leading_uppercase() {
        let dict = dictionary();
        let lookup = |term: &str| -> Option<Suggestion> {
            dict.contains(term).then(|| Suggestion::new(term, 0, 100))
        };
        let result = word_segmentation("Thequickbrownfox", 20, &lookup, 1_024_908_267_229);
        assert!(result.corrected.starts_with("The"));
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let lookup = |_: &str| -> Option<Suggestion> { None };
        let result = word_segmentation("", 20, &lookup, 1_024_908_267_229);
        assert_eq!(result.corrected, "");
        assert_eq!(result.segmented, "");
    }
}
