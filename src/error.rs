// File: src/error.rs
use crate::core::types::Word;
use std::num::ParseIntError;
use std::path::PathBuf;

pub type Result<T, E = DictError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    /// A record did not split into the expected number of tab-separated fields.
    #[error("{}:{line}: expected {expected} tab-separated fields, found {found}", path.display())]
    FieldCount {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}:{line}: invalid index '{value}'", path.display())]
    InvalidIndex {
        path: PathBuf,
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{}: {reason}", path.display())]
    InvalidEncoding { path: PathBuf, reason: &'static str },

    /// The name is already present in the base or custom dictionary.
    #[error("the word {} is already in the dictionary", .0.name())]
    Conflict(Word),

    #[error("the word {} is not in the custom dictionary", .0.name())]
    NotFound(Word),

    #[error("cannot add an empty word")]
    EmptyWord,

    /// Tabs and line breaks would split the record when the file is read back.
    #[error("the word {0:?} contains a tab or line break")]
    InvalidWord(String),

    #[error("no index left for code {code}")]
    IndexExhausted { code: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DictError {
    /// True for malformed dictionary content, as opposed to I/O or rule violations.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::FieldCount { .. } | Self::InvalidIndex { .. } | Self::InvalidEncoding { .. }
        )
    }
}
