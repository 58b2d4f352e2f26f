use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`crate::SymSpell`] construction, configuration and querying.
///
/// Malformed dictionary rows and "no suggestion found" are *not* represented here: both are
/// part of normal operation (see the error handling design notes) and are reported through
/// return values (`Ok(false)`, an empty suggestion list) rather than `Err`.
#[derive(Debug, Error)]
pub enum SymSpellError {
    #[error("invalid symspell configuration: {0}")]
    InvalidConfig(String),

    #[error("requested max edit distance {requested} exceeds dictionary max edit distance {max}")]
    EditDistanceOutOfRange { requested: u32, max: u32 },

    #[error("dictionary file not found: {0}")]
    DictionaryNotFound(PathBuf),

    #[error("i/o error reading dictionary: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize symspell snapshot: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SymSpellError>;
