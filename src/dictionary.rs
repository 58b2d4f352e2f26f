//! Dictionary/bigram/corpus loading: line-oriented parsing plus the Unicode word regex shared by
//! corpus tokenisation and compound-lookup tokenisation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;

/// Unicode letters, numbers, apostrophe and right single quote. `\w` in most regex engines
/// includes underscore, which a word-tokenisation pattern should exclude, so this spells out
/// the character class instead of relying on `\w`.
const WORD_REGEX_PATTERN: &str = r"[\p{L}\p{N}'\u{2019}]+";

fn word_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(WORD_REGEX_PATTERN).expect("static word regex is valid"))
}

/// Tokenises `text` with the Unicode word regex used for corpus loading and compound lookup.
/// Apostrophes are not split off their word.
pub fn tokenize(text: &str) -> Vec<String> {
    word_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Opens `path`, returning `Ok(None)` (not an error) when the file does not exist. Callers use
/// this to implement the "loader returns false on missing file" contract.
fn open_existing(path: &Path) -> Result<Option<File>> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Reads every line of `path` into memory. `BufReader::lines()` already normalises LF/CR/CRLF
/// terminators. Returns `Ok(None)` if the file is absent.
pub fn read_lines(path: &Path) -> Result<Option<Vec<String>>> {
    match open_existing(path)? {
        None => Ok(None),
        Some(file) => {
            let reader = BufReader::new(file);
            let mut lines = Vec::new();
            for line in reader.lines() {
                lines.push(line?);
            }
            Ok(Some(lines))
        }
    }
}

/// Parses one `(term, count)` frequency-dictionary row. With `separator = None`, fields split on
/// whitespace; with an explicit separator, the line is split on that character instead. Rows with
/// fewer than the required fields, or an unparseable count, are skipped (return `None`) rather
/// than erroring: dictionary files routinely contain malformed rows.
pub fn parse_dictionary_line(
    line: &str,
    term_index: usize,
    count_index: usize,
    separator: Option<char>,
) -> Option<(String, i64)> {
    let parts: Vec<&str> = match separator {
        None => line.split_whitespace().collect(),
        Some(sep) => line.split(sep).collect(),
    };
    let needed = term_index.max(count_index);
    if parts.len() <= needed {
        return None;
    }
    let term = parts[term_index].trim().to_string();
    let count: i64 = parts[count_index].trim().parse().ok()?;
    Some((term, count))
}

/// Parses one bigram-dictionary row. With `separator = None`, the key is
/// `parts[term_index] + " " + parts[term_index + 1]` split on whitespace. With an explicit
/// separator, the line is split on that character instead, and the key is the single field at
/// `term_index` (which may itself contain whitespace, e.g. a two-word phrase).
pub fn parse_bigram_line(
    line: &str,
    term_index: usize,
    count_index: usize,
    separator: Option<char>,
) -> Option<(String, i64)> {
    match separator {
        None => {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() <= term_index + 1 || parts.len() <= count_index {
                return None;
            }
            let key = format!("{} {}", parts[term_index], parts[term_index + 1]);
            let count: i64 = parts[count_index].parse().ok()?;
            Some((key, count))
        }
        Some(sep) => {
            let parts: Vec<&str> = line.split(sep).collect();
            let needed = term_index.max(count_index);
            if parts.len() <= needed {
                return None;
            }
            let key = parts[term_index].trim().to_string();
            let count: i64 = parts[count_index].trim().parse().ok()?;
            Some((key, count))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_punctuation_but_keeps_apostrophes() {
        let tokens = tokenize("couqdn'tread in sixtgrade, forImuch!");
        assert_eq!(tokens, vec!["couqdn'tread", "in", "sixtgrade", "forImuch"]);
    }

    #[test]
    fn dictionary_line_parses_term_and_count() {
        assert_eq!(
            parse_dictionary_line("hello 1000", 0, 1, None),
            Some(("hello".to_string(), 1000))
        );
    }

    #[test]
    fn dictionary_line_with_too_few_fields_is_skipped() {
        assert_eq!(parse_dictionary_line("hello", 0, 1, None), None);
    }

    #[test]
    fn dictionary_line_with_unparseable_count_is_skipped() {
        assert_eq!(parse_dictionary_line("hello notanumber", 0, 1, None), None);
    }

    #[test]
    fn dictionary_line_with_explicit_separator_splits_on_it() {
        assert_eq!(
            parse_dictionary_line("hello,1000", 0, 1, Some(',')),
            Some(("hello".to_string(), 1000))
        );
    }

    #[test]
    fn bigram_default_separator_joins_two_fields() {
        assert_eq!(
            parse_bigram_line("abcs forabolishingtheslavetrade 100", 0, 2, None),
            Some(("abcs forabolishingtheslavetrade".to_string(), 100))
        );
    }

    #[test]
    fn bigram_with_explicit_separator_uses_single_field() {
        assert_eq!(
            parse_bigram_line("new york\t500", 0, 1, Some('\t')),
            Some(("new york".to_string(), 500))
        );
    }
}
