use crate::table::{ReplacementTable, TableError};
use aho_corasick::{AhoCorasick, MatchKind};
use std::borrow::Cow;

/// Replacement count for one table entry, labelled by the glyph it restores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternHit {
    pub glyph: String,
    pub count: usize,
}

/// Multi-pattern byte replacer over a validated table.
#[derive(Debug)]
pub struct Corrector {
    automaton: AhoCorasick,
    table: ReplacementTable,
}

impl Corrector {
    pub fn new(table: ReplacementTable) -> Result<Self, TableError> {
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(table.entries().iter().map(|e| e.malformed.as_slice()))?;
        Ok(Self { automaton, table })
    }

    #[inline]
    #[must_use]
    pub fn table(&self) -> &ReplacementTable {
        &self.table
    }

    /// Replaces every non-overlapping occurrence of a malformed key in a
    /// single left-to-right pass. Borrows the input when nothing matches.
    #[must_use]
    pub fn correct<'a>(&self, input: &'a [u8]) -> Correction<'a> {
        let mut counts = vec![0usize; self.table.len()];
        let mut output: Option<Vec<u8>> = None;
        let mut last = 0;

        for m in self.automaton.find_iter(input) {
            let idx = m.pattern().as_usize();
            let out = output.get_or_insert_with(|| Vec::with_capacity(input.len()));
            out.extend_from_slice(&input[last..m.start()]);
            out.extend_from_slice(&self.table.entries()[idx].corrected);
            counts[idx] += 1;
            last = m.end();
        }

        match output {
            Some(mut out) => {
                out.extend_from_slice(&input[last..]);
                let hits = self
                    .table
                    .entries()
                    .iter()
                    .zip(&counts)
                    .filter(|&(_, &count)| count > 0)
                    .map(|(entry, &count)| PatternHit {
                        glyph: entry.glyph(),
                        count,
                    })
                    .collect();
                Correction {
                    bytes: Cow::Owned(out),
                    hits,
                }
            }
            None => Correction {
                bytes: Cow::Borrowed(input),
                hits: Vec::new(),
            },
        }
    }
}

/// Outcome of one corrective pass over a byte buffer.
#[derive(Debug)]
pub struct Correction<'a> {
    bytes: Cow<'a, [u8]>,
    hits: Vec<PatternHit>,
}

impl Correction<'_> {
    /// True when at least one key matched. A match always changes the
    /// buffer because no-op entries are rejected at table construction.
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.hits.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_owned()
    }

    #[must_use]
    pub fn replacements(&self) -> usize {
        self.hits.iter().map(|h| h.count).sum()
    }

    #[inline]
    #[must_use]
    pub fn hits(&self) -> &[PatternHit] {
        &self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector() -> Corrector {
        Corrector::new(ReplacementTable::builtin()).unwrap()
    }

    #[test]
    fn replaces_single_key() {
        let input = [0x70, 0xC3, 0x83, 0xC2, 0xA1, 0x67];
        let correction = corrector().correct(&input);

        assert!(correction.changed());
        assert_eq!(correction.bytes(), [0x70, 0xC3, 0xA1, 0x67]);
        assert_eq!(correction.replacements(), 1);
    }

    #[test]
    fn clean_input_is_borrowed() {
        let input = b"nothing to repair here";
        let correction = corrector().correct(input);

        assert!(!correction.changed());
        assert!(matches!(correction.bytes, Cow::Borrowed(_)));
        assert_eq!(correction.bytes(), input.as_slice());
    }
}
