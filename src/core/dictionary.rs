// File: src/core/dictionary.rs
use crate::core::types::Word;
use crate::error::{DictError, Result};
use crate::persistence::{load_dictionary, save_dictionary};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The pre-supplied word list. Never written back.
#[derive(Debug, Clone, Default)]
pub struct BaseDictionary {
    words: Vec<Word>,
}

impl BaseDictionary {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self { words: load_dictionary(path)? })
    }

    pub fn from_words(words: Vec<Word>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

/// The user's custom word list and the file backing it.
///
/// Every change goes through [`OverlayDictionary::replace`], which rewrites the
/// whole file and then re-reads it; the in-memory list is always what was just
/// parsed back from disk.
#[derive(Debug, Clone)]
pub struct OverlayDictionary {
    path: PathBuf,
    words: Vec<Word>,
}

impl OverlayDictionary {
    /// Opens the overlay at `path`. A file that does not exist yet is an
    /// empty overlay; it is created by the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let words = match load_dictionary(&path) {
            Ok(words) => words,
            Err(DictError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "custom dictionary missing, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self { path, words })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    /// Persists `words` over the backing file, then reloads from it.
    pub fn replace(&mut self, words: &[Word]) -> Result<()> {
        save_dictionary(&self.path, words)?;
        self.reload()
    }

    pub fn reload(&mut self) -> Result<()> {
        self.words = load_dictionary(&self.path)?;
        Ok(())
    }
}
