// --- File: src/core/char_index.rs
use crate::core::types::Word;
use crate::error::Result;
use crate::persistence::load_single_char_words;
use std::collections::HashMap;
use std::path::Path;

/// Per-character code table, read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct SingleCharIndex {
    words: Vec<Word>,
    /// Position in `words` of the first entry for each one-character name.
    by_char: HashMap<char, usize>,
}

impl SingleCharIndex {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_words(load_single_char_words(path)?))
    }

    pub fn from_words(words: Vec<Word>) -> Self {
        let mut by_char = HashMap::with_capacity(words.len());
        for (pos, word) in words.iter().enumerate() {
            let mut chars = word.name().chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                by_char.entry(c).or_insert(pos);
            }
        }
        Self { words, by_char }
    }

    pub fn lookup(&self, c: char) -> Option<&Word> {
        self.by_char.get(&c).map(|&pos| &self.words[pos])
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
