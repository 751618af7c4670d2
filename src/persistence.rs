// File: src/persistence.rs
//! Text formats of the three dictionary files.
//!
//! The single-character table is UTF-8 `name<TAB>code`. The base and custom
//! dictionaries are UTF-16 `name<TAB>code<TAB>index`; they are read with BOM
//! detection (big-endian when absent) and always written big-endian with a BOM.
use crate::core::types::{Word, WordIndex};
use crate::error::{DictError, Result};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const UTF8_BOM: char = '\u{feff}';
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Loads the single-character code table. Every line must hold exactly two fields.
pub fn load_single_char_words(path: &Path) -> Result<Vec<Word>> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| DictError::InvalidEncoding {
        path: path.to_path_buf(),
        reason: "file is not valid UTF-8",
    })?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);

    let words = records(text)
        .enumerate()
        .map(|(i, line)| {
            let fields = split_fields(path, i + 1, line, 2)?;
            Ok(Word::new(fields[0], fields[1]))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(path = %path.display(), entries = words.len(), "loaded single-character table");
    Ok(words)
}

/// Loads a base or custom dictionary. Any malformed line fails the whole load.
pub fn load_dictionary(path: &Path) -> Result<Vec<Word>> {
    let bytes = fs::read(path)?;
    let text = decode_utf16(path, &bytes)?;

    let words = records(&text)
        .enumerate()
        .map(|(i, line)| parse_ranked(path, i + 1, line))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(path = %path.display(), entries = words.len(), "loaded dictionary");
    Ok(words)
}

/// Overwrites `path` with `words`, one record per line. An existing file
/// keeps its permissions. Nothing is written if any entry holds a tab or
/// line break.
pub fn save_dictionary(path: &Path, words: &[Word]) -> Result<()> {
    if let Some(bad) = words.iter().find(|w| !w.is_storable()) {
        return Err(DictError::InvalidWord(bad.name().to_string()));
    }

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let text = words.iter().map(Word::to_string).collect::<Vec<_>>().join("\n");

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        writer.write_all(&encode_utf16(&text))?;
        writer.flush()?;
    }

    match fs::metadata(path) {
        Ok(existing) => temp_file.as_file().set_permissions(existing.permissions())?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    tracing::debug!(path = %path.display(), entries = words.len(), "saved dictionary");
    Ok(())
}

/// Splits on `\n`, `\r\n` or a lone `\r`. A final terminator does not start
/// an empty record.
fn records(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let (line, tail) = match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                (&rest[..end], &rest[end + skip..])
            }
            None => (rest, ""),
        };
        rest = tail;
        Some(line)
    })
}

fn parse_ranked(path: &Path, line_no: usize, line: &str) -> Result<Word> {
    let fields = split_fields(path, line_no, line, 3)?;
    let index = fields[2]
        .parse::<WordIndex>()
        .map_err(|source| DictError::InvalidIndex {
            path: path.to_path_buf(),
            line: line_no,
            value: fields[2].to_string(),
            source,
        })?;
    Ok(Word::ranked(fields[0], fields[1], index))
}

fn split_fields<'a>(path: &Path, line_no: usize, line: &'a str, expected: usize) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != expected {
        return Err(DictError::FieldCount {
            path: path.to_path_buf(),
            line: line_no,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

fn decode_utf16(path: &Path, bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(DictError::InvalidEncoding {
            path: path.to_path_buf(),
            reason: "odd number of bytes in UTF-16 file",
        });
    }

    let (body, little_endian) = match bytes {
        [a, b, rest @ ..] if [*a, *b] == UTF16_BE_BOM => (rest, false),
        [a, b, rest @ ..] if [*a, *b] == UTF16_LE_BOM => (rest, true),
        _ => (bytes, false),
    };

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            let pair = [pair[0], pair[1]];
            if little_endian {
                u16::from_le_bytes(pair)
            } else {
                u16::from_be_bytes(pair)
            }
        })
        .collect();

    String::from_utf16(&units).map_err(|_| DictError::InvalidEncoding {
        path: path.to_path_buf(),
        reason: "unpaired surrogate in UTF-16 file",
    })
}

fn encode_utf16(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&UTF16_BE_BOM);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}
