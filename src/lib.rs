//! Symmetric Delete spelling correction over a frequency-weighted vocabulary: single-term
//! lookup, multi-term compound correction and whitespace-free word segmentation, all built on
//! one delete-prefix index (see [`index`]).
//!
//! [`SymSpell`] is the public entry point; the submodules are the pieces it composes and are not
//! meant to be used standalone.

mod compound;
mod deletes;
mod dictionary;
mod distance;
pub mod error;
mod hashing;
mod index;
mod lookup;
mod segmentation;
pub mod suggestion;
mod vocabulary;

pub use error::{Result, SymSpellError};
pub use segmentation::SegmentationResult;
pub use suggestion::{Suggestion, Verbosity};

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use cachers::{Cache, LFUCache};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use deletes::edits_prefix;
use hashing::{compact_mask, delete_hash};
use index::{DeleteIndex, StagingBuilder};
use vocabulary::VocabularyStore;

/// Normalisation constant for compound/segmentation probability scoring: the assumed total
/// token count of the training corpus; the reference corpus's value is kept as the
/// default but it is a configurable field, not a hard-coded literal.
const DEFAULT_N: i64 = 1_024_908_267_229;
const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// The Symmetric Delete spell-checker: a two-tier vocabulary, a delete-prefix index over it, and
/// the three query operators built on that index.
///
/// Construction validates `(initial_capacity, max_dictionary_edit_distance, prefix_length,
/// count_threshold, compact_level)`; mutation (`create_dictionary_entry` and the dictionary
/// loaders) takes `&mut self`, every query takes `&self`: that split is what makes `lookup_batch`
/// and `lookup_compound_batch` safe to parallelise, as long as no mutation runs concurrently.
pub struct SymSpell {
    vocab: VocabularyStore,
    index: DeleteIndex,
    bigrams: HashMap<String, i64>,
    bigram_count_min: i64,
    max_dictionary_edit_distance: u32,
    prefix_length: usize,
    compact_level: u8,
    compact_mask: u32,
    n: i64,
    cache: LFUCache<String, Vec<Suggestion>>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    vocab: VocabularyStore,
    index: DeleteIndex,
    bigrams: HashMap<String, i64>,
    bigram_count_min: i64,
    max_dictionary_edit_distance: u32,
    prefix_length: usize,
    compact_level: u8,
    n: i64,
}

impl SymSpell {
    /// Builds a new, empty instance. `initial_capacity` is accepted for API parity with the
    /// reference constructor (a capacity hint) but isn't load-bearing for a `HashMap`-backed
    /// store; it is still validated so a caller's negative-capacity bug surfaces immediately
    /// rather than silently.
    pub fn new(
        initial_capacity: i64,
        max_dictionary_edit_distance: i64,
        prefix_length: i64,
        count_threshold: i64,
        compact_level: u8,
    ) -> Result<Self> {
        if initial_capacity < 0 {
            return Err(SymSpellError::InvalidConfig(
                "initial_capacity must be non-negative".to_string(),
            ));
        }
        if max_dictionary_edit_distance < 0 {
            return Err(SymSpellError::InvalidConfig(
                "max_dictionary_edit_distance must be non-negative".to_string(),
            ));
        }
        if prefix_length <= max_dictionary_edit_distance {
            return Err(SymSpellError::InvalidConfig(
                "prefix_length must exceed max_dictionary_edit_distance".to_string(),
            ));
        }
        if compact_level > 16 {
            return Err(SymSpellError::InvalidConfig(
                "compact_level must be at most 16".to_string(),
            ));
        }

        Ok(Self {
            vocab: VocabularyStore::new(count_threshold),
            index: DeleteIndex::new(),
            bigrams: HashMap::new(),
            bigram_count_min: i64::MAX,
            max_dictionary_edit_distance: max_dictionary_edit_distance as u32,
            prefix_length: prefix_length as usize,
            compact_level,
            compact_mask: compact_mask(compact_level),
            n: DEFAULT_N,
            cache: LFUCache::new(DEFAULT_CACHE_CAPACITY),
        })
    }

    /// Overrides the probability-normalisation constant `N`; defaults to
    /// [`DEFAULT_N`].
    pub fn with_n(mut self, n: i64) -> Self {
        self.n = n;
        self
    }

    /// Overrides the suggestion-cache capacity; defaults to `DEFAULT_CACHE_CAPACITY` (10,000).
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = LFUCache::new(capacity);
        self
    }

    /// Adds `count` to `term`'s accumulated frequency, expanding the delete index the
    /// moment `term` first crosses `count_threshold`. Returns whether this call performed that
    /// promotion. Always invalidates the suggestion cache: even a non-promoting count bump can
    /// change `Top`'s tie-break (smallest distance, then largest count).
    pub fn create_dictionary_entry(&mut self, term: &str, count: i64) -> bool {
        let promoted = self.vocab.upsert(term, count);
        if promoted {
            for d in edits_prefix(term, self.prefix_length, self.max_dictionary_edit_distance as usize) {
                self.index.add_reverse_edge(delete_hash(&d, self.compact_mask), term);
            }
        }
        self.cache.clear();
        tracing::debug!(term, count, promoted, "upserted dictionary entry");
        promoted
    }

    /// Same promotion logic as `create_dictionary_entry`, but reverse edges go into `staging`
    /// rather than straight into the live index, so a bulk load doesn't repeatedly reallocate
    /// buckets that already hold entries. Used by the line-oriented loaders below; `staging` is
    /// committed once after the whole file has been read.
    fn stage_dictionary_entry(&mut self, term: &str, count: i64, staging: &mut StagingBuilder) {
        let promoted = self.vocab.upsert(term, count);
        if promoted {
            for d in edits_prefix(term, self.prefix_length, self.max_dictionary_edit_distance as usize) {
                staging.add(delete_hash(&d, self.compact_mask), term);
            }
        }
    }

    /// Loads a frequency dictionary: one `(term, count)` record per line, columns at
    /// `term_index`/`count_index`, split on `separator` (whitespace if `None`). Returns
    /// `Ok(false)` if `path` doesn't exist (not an error); malformed rows are skipped and logged
    /// at `debug`, not treated as a load failure. Reverse edges are staged and committed once the
    /// whole file has been read.
    pub fn load_dictionary(
        &mut self,
        path: &Path,
        term_index: usize,
        count_index: usize,
        separator: Option<char>,
    ) -> Result<bool> {
        let Some(lines) = dictionary::read_lines(path)? else {
            return Ok(false);
        };
        let mut staging = StagingBuilder::new();
        for line in lines {
            match dictionary::parse_dictionary_line(&line, term_index, count_index, separator) {
                Some((term, count)) => {
                    self.stage_dictionary_entry(&term, count, &mut staging);
                }
                None => tracing::debug!(%line, "skipped malformed dictionary row"),
            }
        }
        staging.commit_to(&mut self.index);
        self.cache.clear();
        Ok(true)
    }

    /// Loads a bigram dictionary. With `separator = None`, each record's key is its
    /// first two whitespace-separated fields joined by a space; with an explicit separator, the
    /// key is the single field at `term_index` after splitting on that character. Tracks the
    /// minimum observed count as `bigram_count_min`, used as the Naive-Bayes floor in
    /// `lookup_compound`.
    pub fn load_bigram_dictionary(
        &mut self,
        path: &Path,
        term_index: usize,
        count_index: usize,
        separator: Option<char>,
    ) -> Result<bool> {
        let Some(lines) = dictionary::read_lines(path)? else {
            return Ok(false);
        };
        for line in lines {
            match dictionary::parse_bigram_line(&line, term_index, count_index, separator) {
                Some((key, count)) => {
                    self.bigram_count_min = self.bigram_count_min.min(count);
                    self.bigrams.insert(key, count);
                }
                None => tracing::debug!(%line, "skipped malformed bigram row"),
            }
        }
        Ok(true)
    }

    /// Loads a plain-text corpus: tokenises every line with the Unicode word regex
    /// (after lower-casing) and inserts each token with count 1. Reverse edges are staged and
    /// committed once the whole file has been read.
    pub fn create_dictionary(&mut self, path: &Path) -> Result<bool> {
        let Some(lines) = dictionary::read_lines(path)? else {
            return Ok(false);
        };
        let mut staging = StagingBuilder::new();
        for line in lines {
            for token in dictionary::tokenize(&line.to_lowercase()) {
                self.stage_dictionary_entry(&token, 1, &mut staging);
            }
        }
        staging.commit_to(&mut self.index);
        self.cache.clear();
        Ok(true)
    }

    /// Drops every below-threshold entry, releasing memory held for terms that never reached
    /// `count_threshold`.
    pub fn purge_below_threshold(&mut self) -> usize {
        let dropped = self.vocab.purge_below_threshold();
        self.cache.clear();
        dropped
    }

    /// Runs `lookup` with the given verbosity, memoised in an LFU cache keyed on
    /// `(input, verbosity, max_edit_distance, include_unknown)`. Errors iff `max_edit_distance`
    /// exceeds the dictionary-wide bound fixed at construction.
    pub fn lookup(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: u32,
        include_unknown: bool,
    ) -> Result<Vec<Suggestion>> {
        let key = cache_key(input, verbosity, max_edit_distance, include_unknown);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let result = lookup::lookup(
            &self.vocab,
            &self.index,
            self.compact_mask,
            self.prefix_length,
            self.max_dictionary_edit_distance,
            input,
            verbosity,
            max_edit_distance,
            include_unknown,
        )?;
        self.cache.set(key, result.clone());
        Ok(result)
    }

    /// `lookup` over every element of `inputs` via `rayon::par_iter`. Read-only: safe to call
    /// concurrently with other lookups, never with a concurrent mutation.
    pub fn lookup_batch(
        &self,
        inputs: &[String],
        verbosity: Verbosity,
        max_edit_distance: u32,
        include_unknown: bool,
    ) -> Result<Vec<Vec<Suggestion>>> {
        inputs
            .par_iter()
            .map(|input| self.lookup(input, verbosity, max_edit_distance, include_unknown))
            .collect()
    }

    fn lookup_top(&self, term: &str, max_edit_distance: u32) -> Option<Suggestion> {
        let mut results = self.lookup(term, Verbosity::Top, max_edit_distance, false).ok()?;
        if results.is_empty() { None } else { Some(results.remove(0)) }
    }

    /// Runs `lookup_compound`: tokenises `input`, merges/splits tokens against the
    /// vocabulary and bigram dictionary, and returns a single aggregate [`Suggestion`].
    pub fn lookup_compound(&self, input: &str, max_edit_distance: u32) -> Suggestion {
        let lookup_top = |term: &str| self.lookup_top(term, max_edit_distance);
        let distance_bounded = |a: &str, b: &str, bound: u32| distance::distance_osa(a, b, bound);
        compound::lookup_compound(
            input,
            max_edit_distance,
            &lookup_top,
            &distance_bounded,
            &self.bigrams,
            self.bigram_count_min,
            self.n,
        )
    }

    /// `lookup_compound` over every element of `inputs` via `rayon::par_iter`.
    pub fn lookup_compound_batch(&self, inputs: &[String], max_edit_distance: u32) -> Vec<Suggestion> {
        inputs
            .par_iter()
            .map(|input| self.lookup_compound(input, max_edit_distance))
            .collect()
    }

    /// Runs `word_segmentation`: inserts missing spaces into `input` using the
    /// triangular-matrix ring-buffer DP.
    pub fn word_segmentation(
        &self,
        input: &str,
        max_edit_distance: u32,
        max_segment_word_len: usize,
    ) -> SegmentationResult {
        let lookup_top = |term: &str| self.lookup_top(term, max_edit_distance);
        segmentation::word_segmentation(input, max_segment_word_len, &lookup_top, self.n)
    }

    pub fn size(&self) -> usize {
        self.vocab.size()
    }

    pub fn pending_size(&self) -> usize {
        self.vocab.pending_size()
    }

    pub fn bigram_count_min(&self) -> i64 {
        self.bigram_count_min
    }

    pub fn max_dictionary_edit_distance(&self) -> u32 {
        self.max_dictionary_edit_distance
    }

    /// Writes a serde snapshot of `V`, `B`, `D` and the bigram map to `path`. This persists the
    /// already-built structures verbatim rather than adding incremental persistence.
    pub fn save_to_json(&self, path: &Path) -> Result<()> {
        let snapshot = Snapshot {
            vocab: self.vocab.clone(),
            index: self.index.clone(),
            bigrams: self.bigrams.clone(),
            bigram_count_min: self.bigram_count_min,
            max_dictionary_edit_distance: self.max_dictionary_edit_distance,
            prefix_length: self.prefix_length,
            compact_level: self.compact_level,
            n: self.n,
        };
        let file = File::create(path)?;
        serde_json::to_writer(file, &snapshot)?;
        tracing::info!(path = %path.display(), "wrote symspell snapshot");
        Ok(())
    }

    /// Restores an instance from a snapshot written by [`Self::save_to_json`]. The suggestion
    /// cache starts cold (`cache_capacity` sized). It is derived state, not persisted.
    pub fn load_from_json(path: &Path, cache_capacity: usize) -> Result<Self> {
        let file = File::open(path)?;
        let snapshot: Snapshot = serde_json::from_reader(file)?;
        let compact_mask = compact_mask(snapshot.compact_level);
        tracing::info!(path = %path.display(), "loaded symspell snapshot");
        Ok(Self {
            vocab: snapshot.vocab,
            index: snapshot.index,
            bigrams: snapshot.bigrams,
            bigram_count_min: snapshot.bigram_count_min,
            max_dictionary_edit_distance: snapshot.max_dictionary_edit_distance,
            prefix_length: snapshot.prefix_length,
            compact_level: snapshot.compact_level,
            compact_mask,
            n: snapshot.n,
            cache: LFUCache::new(cache_capacity),
        })
    }
}

impl Default for SymSpell {
    /// `(initial_capacity=16, max_dictionary_edit_distance=2, prefix_length=7,
    /// count_threshold=1, compact_level=5)`: the reference implementation's defaults.
    fn default() -> Self {
        Self::new(16, 2, 7, 1, 5).expect("default SymSpell configuration is always valid")
    }
}

fn cache_key(input: &str, verbosity: Verbosity, max_edit_distance: u32, include_unknown: bool) -> String {
    format!("{input}\u{0}{verbosity:?}\u{0}{max_edit_distance}\u{0}{include_unknown}")
}
