// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank of a word among the words sharing its code (its homophone group).
pub type WordIndex = u32;

const SEPARATORS: [char; 3] = ['\t', '\n', '\r'];

/// True if `text` holds a field or record separator of the dictionary files.
pub fn contains_separator(text: &str) -> bool {
    text.contains(&SEPARATORS[..])
}

/// A dictionary entry. Immutable once built: the index is fixed at
/// construction, either by the loader or by the index allocator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    name: String,
    code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<WordIndex>,
}

impl Word {
    /// A single-character table entry, which carries no rank.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self { name: name.into(), code: code.into(), index: None }
    }

    /// A base or custom dictionary entry.
    pub fn ranked(name: impl Into<String>, code: impl Into<String>, index: WordIndex) -> Self {
        Self { name: name.into(), code: code.into(), index: Some(index) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn index(&self) -> Option<WordIndex> {
        self.index
    }

    /// Whether the entry survives a write and re-read as a single record.
    pub fn is_storable(&self) -> bool {
        !contains_separator(&self.name) && !contains_separator(&self.code)
    }
}

/// `name<TAB>code`, followed by `<TAB>index` for ranked entries.
/// This is also the line format of the dictionary files.
impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.name, self.code)?;
        if let Some(index) = self.index {
            write!(f, "\t{}", index)?;
        }
        Ok(())
    }
}
