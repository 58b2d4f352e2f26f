use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use symspell::{SymSpell, Verbosity};

fn bench_spell_check_string(c: &mut Criterion) {
    let dict_file = Path::new("words_100k.txt");
    let max_edit_distance: u32 = 2;

    let text_content = "This is a short sntence with some misspelled wrds. It is used for testing the spell checker functionality.".to_string();

    let mut spell_corrector = SymSpell::new(16, max_edit_distance as i64, 7, 1, 5).unwrap();
    spell_corrector
        .load_dictionary(dict_file, 0, 1, None)
        .expect("Unable to read dictionary file");

    let words: Vec<String> = text_content
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect();

    c.bench_function("spell_check_words", |b| {
        b.iter(|| {
            let _ = spell_corrector.lookup_batch(&words, Verbosity::Top, max_edit_distance, false);
        })
    });
}

criterion_group!(benches, bench_spell_check_string);
criterion_main!(benches);
