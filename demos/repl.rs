use std::{
    env,
    io::{self, Write},
    path::Path,
};

use symspell::{SymSpell, Verbosity};

const MAX_EDIT_DISTANCE: u32 = 2;

fn main() -> io::Result<()> {
    let dict_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "words_100k.txt".into());

    if !Path::new(&dict_path).exists() {
        eprintln!("Dictionary file not found: {}", dict_path);
        std::process::exit(1);
    }

    let mut corrector = SymSpell::new(16, MAX_EDIT_DISTANCE as i64, 7, 1, 5).unwrap();
    corrector
        .load_dictionary(Path::new(&dict_path), 0, 1, None)
        .expect("Unable to read dictionary file");

    println!(
        "SymSpell REPL - dictionary: {}\n:type text, :q to quit",
        dict_path
    );
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        if input.trim() == ":q" {
            break;
        }

        for token in input.split_whitespace() {
            let word = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if word.is_empty() {
                continue;
            }

            match corrector.lookup(&word, Verbosity::Closest, MAX_EDIT_DISTANCE, false) {
                Ok(suggestions) if !suggestions.is_empty() => {
                    let rendered: Vec<_> = suggestions.iter().map(|s| s.term.as_str()).collect();
                    println!("  {}  ->  {}", word, rendered.join(", "));
                }
                Ok(_) => {}
                Err(e) => eprintln!("lookup error for {word:?}: {e}"),
            }
        }
    }
    Ok(())
}
