use memchr::memmem;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid table JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("entry {index}: invalid hex in `{field}`: {source}")]
    InvalidHex {
        index: usize,
        field: &'static str,
        source: hex::FromHexError,
    },

    #[error("entry {index}: malformed pattern is empty")]
    EmptyPattern { index: usize },

    #[error("entry {index}: replacement is identical to its pattern")]
    NoopEntry { index: usize },

    #[error("entries {first} and {second}: one pattern contains the other")]
    OverlappingPatterns { first: usize, second: usize },

    #[error("entry {index}: replacement reintroduces the pattern of entry {other}")]
    ReintroducesPattern { index: usize, other: usize },

    #[error("failed to build pattern automaton: {0}")]
    Automaton(#[from] aho_corasick::BuildError),
}

/// One malformed-to-corrected byte pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub malformed: Vec<u8>,
    pub corrected: Vec<u8>,
}

impl Replacement {
    pub fn new(malformed: impl Into<Vec<u8>>, corrected: impl Into<Vec<u8>>) -> Self {
        Self {
            malformed: malformed.into(),
            corrected: corrected.into(),
        }
    }

    /// Human-readable form of the corrected bytes, used in reports.
    #[must_use]
    pub fn glyph(&self) -> String {
        String::from_utf8_lossy(&self.corrected).into_owned()
    }
}

// UTF-8 that was re-read as Latin-1 and encoded again. Keys must stay
// mutually non-substring so replacement order cannot matter; validate()
// enforces that for any table built at runtime.
const BUILTIN: &[(&[u8], &[u8])] = &[
    (&[0xC3, 0x83, 0xC2, 0xA1], &[0xC3, 0xA1]), // á
    (&[0xC3, 0x83, 0xC2, 0xA9], &[0xC3, 0xA9]), // é
    (&[0xC3, 0x83, 0xC2, 0xAD], &[0xC3, 0xAD]), // í
    (&[0xC3, 0x83, 0xC2, 0xB3], &[0xC3, 0xB3]), // ó
    (&[0xC3, 0x83, 0xC2, 0xBA], &[0xC3, 0xBA]), // ú
    (&[0xC3, 0x83, 0xC2, 0xB1], &[0xC3, 0xB1]), // ñ
    (&[0xC3, 0x83, 0xE2, 0x80, 0x9C], &[0xC3, 0x93]), // Ó
    (&[0xC3, 0x83, 0xE2, 0x80, 0xA6], &[0xC3, 0x8D]), // Í
    (&[0xC3, 0x83, 0xE2, 0x80, 0x98], &[0xC3, 0x91]), // Ñ
    (&[0xC3, 0x83, 0xC2, 0x81], &[0xC3, 0x81]), // Á
    (&[0xC3, 0x83, 0xC2, 0x89], &[0xC3, 0x89]), // É
    (&[0xC3, 0x83, 0xC5, 0xA0], &[0xC3, 0x9A]), // Ú
];

/// Ordered set of byte-pair replacements, immutable once built.
#[derive(Debug, Clone)]
pub struct ReplacementTable {
    entries: Vec<Replacement>,
}

impl ReplacementTable {
    /// The table shipped with the tool.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|&(malformed, corrected)| Replacement::new(malformed, corrected))
            .collect();
        Self { entries }
    }

    /// Builds a table from explicit entries, rejecting any set that would
    /// make replacement order-dependent or a correction non-idempotent.
    pub fn from_entries(entries: Vec<Replacement>) -> Result<Self, TableError> {
        validate(&entries)?;
        Ok(Self { entries })
    }

    /// Loads a table from a JSON array of hex-encoded byte pairs:
    /// `[{"malformed": "c383c2a1", "corrected": "c3a1"}, ...]`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let data = std::fs::read_to_string(path)?;
        let raw: Vec<RawEntry> = serde_json::from_str(&data)?;

        let mut entries = Vec::with_capacity(raw.len());
        for (index, entry) in raw.iter().enumerate() {
            let malformed =
                hex::decode(&entry.malformed).map_err(|source| TableError::InvalidHex {
                    index,
                    field: "malformed",
                    source,
                })?;
            let corrected =
                hex::decode(&entry.corrected).map_err(|source| TableError::InvalidHex {
                    index,
                    field: "corrected",
                    source,
                })?;
            entries.push(Replacement::new(malformed, corrected));
        }

        Self::from_entries(entries)
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Replacement] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Deserialize)]
struct RawEntry {
    malformed: String,
    corrected: String,
}

fn validate(entries: &[Replacement]) -> Result<(), TableError> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.malformed.is_empty() {
            return Err(TableError::EmptyPattern { index });
        }
        if entry.malformed == entry.corrected {
            return Err(TableError::NoopEntry { index });
        }
    }

    // Equal keys count as overlapping, so duplicates are caught here too.
    for (first, a) in entries.iter().enumerate() {
        for (second, b) in entries.iter().enumerate().skip(first + 1) {
            if memmem::find(&a.malformed, &b.malformed).is_some()
                || memmem::find(&b.malformed, &a.malformed).is_some()
            {
                return Err(TableError::OverlappingPatterns { first, second });
            }
        }
    }

    for (index, entry) in entries.iter().enumerate() {
        for (other, key) in entries.iter().enumerate() {
            if memmem::find(&entry.corrected, &key.malformed).is_some() {
                return Err(TableError::ReintroducesPattern { index, other });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_passes_validation() {
        let entries = ReplacementTable::builtin().entries().to_vec();
        assert!(ReplacementTable::from_entries(entries).is_ok());
    }

    #[test]
    fn glyph_of_first_entry() {
        let table = ReplacementTable::builtin();
        assert_eq!(table.entries()[0].glyph(), "á");
    }

    #[test]
    fn empty_pattern_rejected() {
        let entries = vec![Replacement::new([], [0xC3, 0xA1])];
        assert!(matches!(
            ReplacementTable::from_entries(entries),
            Err(TableError::EmptyPattern { index: 0 })
        ));
    }

    #[test]
    fn noop_entry_rejected() {
        let entries = vec![Replacement::new([0xC3, 0xA1], [0xC3, 0xA1])];
        assert!(matches!(
            ReplacementTable::from_entries(entries),
            Err(TableError::NoopEntry { index: 0 })
        ));
    }
}
