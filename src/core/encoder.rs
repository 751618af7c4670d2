// File: src/core/encoder.rs
use crate::core::char_index::SingleCharIndex;

const GAP_OPEN: &str = " error(";
const GAP_CLOSE: &str = ") ";

/// What one character contributes to a word's code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCode<'a> {
    /// Leading characters of the character's code.
    Found(&'a str),
    /// The character has no entry in the single-character table.
    Missing(char),
}

impl CharCode<'_> {
    fn render(&self, out: &mut String) {
        match self {
            CharCode::Found(code) => out.push_str(code),
            CharCode::Missing(c) => {
                out.push_str(GAP_OPEN);
                out.push(*c);
                out.push_str(GAP_CLOSE);
            }
        }
    }
}

/// Derives the four-key abbreviation code of a word from its characters.
#[derive(Debug, Clone, Default)]
pub struct CodeEncoder {
    chars: SingleCharIndex,
}

impl CodeEncoder {
    pub fn new(chars: SingleCharIndex) -> Self {
        Self { chars }
    }

    /// Never fails. Characters without a code are rendered inline as
    /// ` error(<char>) ` and the rest of the word is still encoded.
    pub fn encode(&self, word: &str) -> String {
        let parts = self.contributions(word);
        let mut code = String::with_capacity(8);
        for part in &parts {
            part.render(&mut code);
        }
        if parts.iter().any(|p| matches!(p, CharCode::Missing(_))) {
            tracing::debug!(word, code = %code, "encoded with missing characters");
        }
        code
    }

    /// The per-character pieces `encode` concatenates:
    ///
    /// | length | pieces |
    /// |---|---|
    /// | 1 | 2 keys of the character |
    /// | 2 | 2 keys of each character |
    /// | 3 | 1 key of each of the first two, 2 keys of the last |
    /// | 4+ | 1 key of each of the first three, 1 key of the last |
    pub fn contributions<'a>(&'a self, word: &str) -> Vec<CharCode<'a>> {
        let chars: Vec<char> = word.chars().collect();
        let picks: Vec<(char, usize)> = match chars.as_slice() {
            [] => Vec::new(),
            [c] => vec![(*c, 2)],
            [a, b] => vec![(*a, 2), (*b, 2)],
            [a, b, c] => vec![(*a, 1), (*b, 1), (*c, 2)],
            [a, b, c, .., last] => vec![(*a, 1), (*b, 1), (*c, 1), (*last, 1)],
        };
        picks.into_iter().map(|(c, keys)| self.take_keys(c, keys)).collect()
    }

    fn take_keys(&self, c: char, keys: usize) -> CharCode<'_> {
        match self.chars.lookup(c) {
            Some(word) => {
                let code = word.code();
                let end = code.char_indices().nth(keys).map_or(code.len(), |(i, _)| i);
                CharCode::Found(&code[..end])
            }
            None => CharCode::Missing(c),
        }
    }
}

/// Characters reported as missing inside a rendered code, in order.
pub fn encoding_gaps(code: &str) -> Vec<char> {
    let mut gaps = Vec::new();
    let mut rest = code;
    while let Some(start) = rest.find(GAP_OPEN) {
        let after = &rest[start + GAP_OPEN.len()..];
        let mut chars = after.chars();
        match (chars.next(), chars.as_str().strip_prefix(GAP_CLOSE)) {
            (Some(c), Some(tail)) => {
                gaps.push(c);
                rest = tail;
            }
            _ => rest = after,
        }
    }
    gaps
}
