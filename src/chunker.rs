//! Chunking of mixed Singlish text.
//!
//! This module splits the input into an exact partition of typed chunks
//! (Latin words, Sinhala runs, numerals, punctuation, whitespace) that the
//! transliterator then classifies and converts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::char_categories::{CharCategory, SiString};

/// Digits with an optional currency prefix and internal separators
static NUMERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?i:rs\.?|lkr|usd)|[$€£¥])?[0-9]+(?:[.,:/][0-9]+)*").expect("Invalid regex")
});

/// Unit and ordinal suffixes that stay attached to a numeral
const UNIT_SUFFIXES: &[&str] = &[
    "kg", "kgs", "g", "mg", "km", "m", "cm", "mm", "l", "ml", "lb", "lbs", "oz", "ft", "in",
    "st", "nd", "rd", "th", "am", "pm", "h", "hr", "hrs", "min", "mins", "s", "sec", "gb", "mb",
    "kb", "tb", "mah", "w", "kw", "v", "x", "k", "lakh", "lakhs",
];

const CURRENCY_SIGNS: &[char] = &['$', '€', '£', '¥'];

/// The type of a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChunkType {
    /// A run of Latin letters
    Word,
    /// A run of Sinhala code points and joiners
    Sinhala,
    /// A numeral with optional currency prefix and unit suffix
    Numeral,
    /// A run of punctuation and symbols
    Punct,
    /// A run of whitespace
    Space,
    /// A run of characters from other scripts
    Other,
}

/// A chunk of text with its type and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The type of this chunk
    pub chunk_type: ChunkType,
    /// Starting byte offset in the original string
    pub start: usize,
    /// Length in bytes
    pub len: usize,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(chunk_type: ChunkType, start: usize, len: usize) -> Self {
        Chunk {
            chunk_type,
            start,
            len,
        }
    }

    /// End byte offset (exclusive)
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The chunk's slice of the chunked string
    pub fn text<'a>(&self, string: &'a str) -> &'a str {
        &string[self.start..self.end()]
    }
}

/// Length of the unit suffix starting at `rest`, if the whole letter run is a unit
fn unit_suffix_len(rest: &str) -> usize {
    let run_len = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map_or(rest.len(), |(idx, _)| idx);
    if run_len == 0 {
        return 0;
    }

    let run = rest[..run_len].to_ascii_lowercase();
    if UNIT_SUFFIXES.contains(&run.as_str()) {
        run_len
    } else {
        0
    }
}

/// Byte length of the numeral at the start of `text`, if there is one
pub fn numeral_len(text: &str) -> Option<usize> {
    let m = NUMERAL_RE.find(text)?;
    let end = m.end();
    Some(end + unit_suffix_len(&text[end..]))
}

/// Chunker for Singlish text
pub struct Chunker {
    /// The analyzed string
    ss: SiString,
}

impl Chunker {
    /// Create a new chunker for the given string
    pub fn new(text: &str) -> Self {
        Chunker {
            ss: SiString::new(text),
        }
    }

    /// Get the original string
    pub fn string(&self) -> &str {
        &self.ss.string
    }

    /// Split the text into chunks. The chunks cover the input exactly.
    pub fn make_chunks(&self) -> Vec<Chunk> {
        if self.ss.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let chars: Vec<char> = self.ss.string.chars().collect();
        let mut byte_positions: Vec<usize> = Vec::with_capacity(chars.len() + 1);

        let mut pos = 0;
        for c in &chars {
            byte_positions.push(pos);
            pos += c.len_utf8();
        }
        byte_positions.push(pos);

        let mut i = 0;
        while i < chars.len() {
            if let Some((chunk, next_i)) = self.read_numeral(&byte_positions, i) {
                chunks.push(chunk);
                i = next_i;
                continue;
            }

            let (chunk, next_i) = match self.ss.categories[i] {
                CharCategory::Latin => {
                    self.read_run(&byte_positions, i, ChunkType::Word, |c| {
                        c == CharCategory::Latin
                    })
                }
                CharCategory::Sinhala => {
                    self.read_run(&byte_positions, i, ChunkType::Sinhala, |c| {
                        c.is_sinhala_part()
                    })
                }
                CharCategory::Whitespace => {
                    self.read_run(&byte_positions, i, ChunkType::Space, |c| {
                        c == CharCategory::Whitespace
                    })
                }
                CharCategory::Punct | CharCategory::Symbol => {
                    self.read_punct(&chars, &byte_positions, i)
                }
                // A stray digit only reaches here if the numeral pattern failed
                CharCategory::Digit => {
                    self.read_run(&byte_positions, i, ChunkType::Numeral, |c| {
                        c == CharCategory::Digit
                    })
                }
                // Joiners outside a Sinhala run are grouped with other text
                CharCategory::Joiner | CharCategory::Other => {
                    self.read_run(&byte_positions, i, ChunkType::Other, |c| {
                        matches!(c, CharCategory::Joiner | CharCategory::Other)
                    })
                }
            };
            chunks.push(chunk);
            i = next_i;
        }

        chunks
    }

    /// Read a maximal run of characters whose category satisfies `keep`
    fn read_run<F>(
        &self,
        byte_positions: &[usize],
        start_i: usize,
        chunk_type: ChunkType,
        keep: F,
    ) -> (Chunk, usize)
    where
        F: Fn(CharCategory) -> bool,
    {
        let mut i = start_i + 1;
        while i < self.ss.len() && keep(self.ss.categories[i]) {
            i += 1;
        }

        let start = byte_positions[start_i];
        let end = byte_positions[i];
        (Chunk::new(chunk_type, start, end - start), i)
    }

    /// Read a numeral starting at position i, if one starts there.
    ///
    /// Currency prefixes only count at the start of a letter run, so the
    /// `rs` in `hours100` is never taken as a prefix.
    fn read_numeral(&self, byte_positions: &[usize], start_i: usize) -> Option<(Chunk, usize)> {
        let cat = self.ss.categories[start_i];
        match cat {
            CharCategory::Digit | CharCategory::Symbol => {}
            CharCategory::Latin => {
                let after_letter = start_i > 0
                    && self.ss.categories[start_i - 1] == CharCategory::Latin;
                if after_letter {
                    return None;
                }
            }
            _ => return None,
        }

        let start = byte_positions[start_i];
        let len = numeral_len(&self.ss.string[start..])?;

        let mut i = start_i;
        while byte_positions[i] < start + len {
            i += 1;
        }
        Some((Chunk::new(ChunkType::Numeral, start, len), i))
    }

    /// Read punctuation and symbols starting at position i.
    ///
    /// The run stops before a currency sign that opens a numeral.
    fn read_punct(
        &self,
        chars: &[char],
        byte_positions: &[usize],
        start_i: usize,
    ) -> (Chunk, usize) {
        let mut i = start_i + 1;

        while i < chars.len() && self.ss.categories[i].is_punct_like() {
            if CURRENCY_SIGNS.contains(&chars[i])
                && numeral_len(&self.ss.string[byte_positions[i]..]).is_some()
            {
                break;
            }
            i += 1;
        }

        let start = byte_positions[start_i];
        let end = byte_positions[i];
        (Chunk::new(ChunkType::Punct, start, end - start), i)
    }
}
