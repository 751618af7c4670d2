use crate::config::Config;
use crate::core::char_index::SingleCharIndex;
use crate::core::dictionary::{BaseDictionary, OverlayDictionary};
use crate::core::encoder::CodeEncoder;
use crate::core::types::{contains_separator, Word, WordIndex};
use crate::error::{DictError, Result};

// The dictionary service owns the encoder, the read-only base list and the
// custom overlay. Mutations take `&mut self`; callers sharing one service
// across threads wrap it in a `Mutex` so that mutate/persist/reload stays a
// single critical section.
pub struct DictionaryService {
    encoder: CodeEncoder,
    base: BaseDictionary,
    overlay: OverlayDictionary,
}

impl DictionaryService {
    pub fn new(encoder: CodeEncoder, base: BaseDictionary, overlay: OverlayDictionary) -> Self {
        Self { encoder, base, overlay }
    }

    /// Loads all three files named by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let chars = SingleCharIndex::load(&config.single_char_path)?;
        let base = BaseDictionary::load(&config.base_path)?;
        let overlay = OverlayDictionary::open(&config.overlay_path)?;
        tracing::info!(
            chars = chars.len(),
            base = base.words().len(),
            custom = overlay.words().len(),
            "dictionaries loaded"
        );
        Ok(Self::new(CodeEncoder::new(chars), base, overlay))
    }

    pub fn encode(&self, word: &str) -> String {
        self.encoder.encode(word)
    }

    pub fn overlay(&self) -> &OverlayDictionary {
        &self.overlay
    }

    /// Base entries followed by custom entries.
    pub fn merged(&self) -> impl Iterator<Item = &Word> + '_ {
        self.base.words().iter().chain(self.overlay.words())
    }

    /// First entry named `name` in the merged view, so a base entry shadows
    /// a custom entry of the same name.
    pub fn find_existing(&self, name: &str) -> Option<&Word> {
        if name.is_empty() {
            return None;
        }
        self.merged().find(|w| w.name() == name)
    }

    /// Next free rank for `code`: one past the highest index any base or
    /// custom entry holds for it, or 1 for a fresh code.
    pub fn allocate_index(&self, code: &str) -> Result<WordIndex> {
        let highest = self
            .merged()
            .filter(|w| w.code() == code)
            .filter_map(Word::index)
            .max();
        match highest {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| DictError::IndexExhausted { code: code.to_string() }),
        }
    }

    /// All entries sharing `code`, ordered by rank.
    pub fn homophones(&self, code: &str) -> Vec<&Word> {
        let mut group: Vec<&Word> = self.merged().filter(|w| w.code() == code).collect();
        group.sort_by_key(|w| w.index());
        group
    }

    pub fn add_word(&mut self, name: &str) -> Result<Word> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DictError::EmptyWord);
        }
        if contains_separator(name) {
            return Err(DictError::InvalidWord(name.to_string()));
        }
        if let Some(existing) = self.find_existing(name) {
            return Err(DictError::Conflict(existing.clone()));
        }

        let code = self.encode(name);
        let index = self.allocate_index(&code)?;
        let word = Word::ranked(name, code, index);

        let mut words = self.overlay.words().to_vec();
        words.push(word.clone());
        self.overlay.replace(&words)?;

        tracing::info!(word = %word, "added custom word");
        Ok(word)
    }

    /// Removes every custom entry equal to `word` in name, code and index.
    /// Base entries are never removed.
    pub fn delete_word(&mut self, word: &Word) -> Result<()> {
        if !self.overlay.contains(word) {
            return Err(DictError::NotFound(word.clone()));
        }

        let words: Vec<Word> = self
            .overlay
            .words()
            .iter()
            .filter(|w| *w != word)
            .cloned()
            .collect();
        self.overlay.replace(&words)?;

        tracing::info!(word = %word, "deleted custom word");
        Ok(())
    }

    /// Deletes the entry `name` resolves to. A name that resolves to a base
    /// entry is reported as not found in the custom dictionary.
    pub fn delete_by_name(&mut self, name: &str) -> Result<Word> {
        let name = name.trim();
        let target = match self.find_existing(name) {
            Some(word) => word.clone(),
            None => return Err(DictError::NotFound(Word::new(name, self.encode(name)))),
        };
        self.delete_word(&target)?;
        Ok(target)
    }
}
