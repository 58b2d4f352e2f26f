//! Bounded edit distance.
//!
//! `distance_osa` computes Damerau-Levenshtein *optimal string alignment* distance (a
//! transposition counts as one edit, but no substring is edited more than once. It is not a
//! full metric, see the crate-level docs). `distance_levenshtein` is the substitution/insert/
//! delete-only companion, kept for callers that don't want transpositions.
//!
//! Both trim common prefix/suffix first, run in rolling rows rather than a full matrix, and
//! bail out as soon as every value in the current row exceeds `max_distance`.

/// Computes the bounded OSA distance between `a` and `b`, confined to a diagonal band of width
/// `max_distance`. Returns `None` if the true distance exceeds `max_distance`.
pub fn distance_osa(a: &str, b: &str, max_distance: u32) -> Option<u32> {
    let max_distance = max_distance as i64;

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let mut start = 0usize;
    while start < a_chars.len()
        && start < b_chars.len()
        && a_chars[start] == b_chars[start]
    {
        start += 1;
    }
    let mut a_end = a_chars.len();
    let mut b_end = b_chars.len();
    while a_end > start && b_end > start && a_chars[a_end - 1] == b_chars[b_end - 1] {
        a_end -= 1;
        b_end -= 1;
    }

    let a_trim = &a_chars[start..a_end];
    let b_trim = &b_chars[start..b_end];

    if a_trim.is_empty() {
        let d = b_trim.len() as i64;
        return if d <= max_distance { Some(d as u32) } else { None };
    }
    if b_trim.is_empty() {
        let d = a_trim.len() as i64;
        return if d <= max_distance { Some(d as u32) } else { None };
    }

    let (shorter, longer) = if a_trim.len() <= b_trim.len() {
        (a_trim, b_trim)
    } else {
        (b_trim, a_trim)
    };

    let len_diff = (longer.len() - shorter.len()) as i64;
    if len_diff > max_distance {
        return None;
    }

    let m = shorter.len();
    let n = longer.len();
    let sentinel = max_distance + 1;

    let mut prev2: Vec<i64> = vec![sentinel; n + 1];
    let mut prev: Vec<i64> = (0..=n as i64).collect();
    let mut curr: Vec<i64> = vec![sentinel; n + 1];

    for i in 1..=m {
        curr.iter_mut().for_each(|v| *v = sentinel);
        curr[0] = i as i64;

        let col_min = if (i as i64) > max_distance {
            i - max_distance as usize
        } else {
            1
        };
        let col_max = ((i as i64) + max_distance).min(n as i64) as usize;

        let mut row_min = i64::MAX;

        for j in col_min..=col_max {
            let cost = if shorter[i - 1] == longer[j - 1] { 0 } else { 1 };
            let del = prev[j] + 1;
            let ins = curr[j - 1] + 1;
            let sub = prev[j - 1] + cost;
            let mut val = del.min(ins).min(sub);

            if i > 1
                && j > 1
                && shorter[i - 1] == longer[j - 2]
                && shorter[i - 2] == longer[j - 1]
            {
                val = val.min(prev2[j - 2] + 1);
            }
            curr[j] = val;
            row_min = row_min.min(val);
        }

        if row_min > max_distance {
            return None;
        }

        std::mem::swap(&mut prev2, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    let result = prev[n];
    if result <= max_distance {
        Some(result as u32)
    } else {
        None
    }
}

/// Bounded Levenshtein (substitution/insert/delete, no transpositions), char-aware companion to
/// [`distance_osa`]. Returns `max_distance + 1` rather than an option when the bound is exceeded.
pub fn distance_levenshtein(a: &str, b: &str, max_distance: usize) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let (shorter, longer) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    if longer.len() - shorter.len() > max_distance {
        return max_distance + 1;
    }

    let n = longer.len();
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, &sc) in shorter.iter().enumerate() {
        let row = i + 1;
        curr[0] = row;

        let col_min = if row > max_distance { row - max_distance } else { 1 };
        let col_max = (row + max_distance).min(n);

        for j in 1..=n {
            if j < col_min || j > col_max {
                curr[j] = max_distance + 1;
                continue;
            }
            let cost = if sc == longer[j - 1] { 0 } else { 1 };
            let ins = curr[j - 1] + 1;
            let del = prev[j] + 1;
            let sub = prev[j - 1] + cost;
            curr[j] = ins.min(del).min(sub);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n].min(max_distance + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_zero() {
        assert_eq!(distance_osa("same", "same", 5), Some(0));
    }

    #[test]
    fn simple_substitution() {
        assert_eq!(distance_osa("abc", "abd", 5), Some(1));
    }

    #[test]
    fn transposition_counts_as_one_edit() {
        assert_eq!(distance_osa("ab", "ba", 5), Some(1));
    }

    #[test]
    fn osa_does_not_reuse_edited_substring() {
        // Classic OSA-vs-full-DL example: OSA is 3, unrestricted Damerau-Levenshtein is 2.
        assert_eq!(distance_osa("sated", "dates", 5), Some(3));
    }

    #[test]
    fn exceeds_bound_returns_none() {
        assert_eq!(distance_osa("kitten", "sitting", 2), None);
        assert_eq!(distance_osa("kitten", "sitting", 3), Some(3));
    }

    #[test]
    fn empty_strings() {
        assert_eq!(distance_osa("", "", 2), Some(0));
        assert_eq!(distance_osa("", "abc", 5), Some(3));
        assert_eq!(distance_osa("abc", "", 5), Some(3));
        assert_eq!(distance_osa("", "abc", 2), None);
    }

    #[test]
    fn common_prefix_and_suffix_are_trimmed() {
        assert_eq!(distance_osa("prefixABCsuffix", "prefixXYZsuffix", 5), Some(3));
    }

    #[test]
    fn unicode_is_char_aware() {
        assert_eq!(distance_osa("caf\u{e9}", "cafe", 2), Some(1));
    }

    #[test]
    fn bounded_levenshtein_stays_within_the_configured_bound() {
        assert_eq!(distance_levenshtein("kitten", "sitting", 3), 3);
        assert_eq!(distance_levenshtein("flaw", "lawn", 2), 2);
        assert!(distance_levenshtein("kitten", "sitting", 2) > 2);
    }

    #[test]
    fn levenshtein_counts_transposition_as_two() {
        // No transposition rule: levenshtein("ab","ba") needs a sub + nothing cheaper -> 2
        assert_eq!(distance_levenshtein("ab", "ba", 5), 2);
    }
}
