//! Token representation for transliterated text.
//!
//! A Token is a contiguous slice of the input together with its
//! classification and the text it renders to in the output.

use serde::{Deserialize, Serialize};

use crate::passthrough::PassthroughReason;

/// The classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TokenKind {
    /// Romanized Sinhala word, converted to Sinhala script
    #[default]
    SinglishWord,
    /// Text already written in Sinhala script
    SinhalaText,
    /// Latin word left as typed (English, brand, acronym, unrecognized)
    LatinPassthrough,
    /// Digits, optionally with a currency prefix or unit suffix
    Numeral,
    /// Punctuation and symbols
    Punctuation,
    /// A run of whitespace, including line breaks
    Whitespace,
    /// Text in any other script
    Other,
}

impl TokenKind {
    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::SinglishWord => "SINGLISH",
            TokenKind::SinhalaText => "SINHALA",
            TokenKind::LatinPassthrough => "LATIN",
            TokenKind::Numeral => "NUM",
            TokenKind::Punctuation => "PUNCT",
            TokenKind::Whitespace => "SPACE",
            TokenKind::Other => "OTHER",
        }
    }

    /// Whether tokens of this kind are emitted unchanged
    pub fn is_passthrough(&self) -> bool {
        !matches!(self, TokenKind::SinglishWord)
    }
}

/// Where the rendered text of a token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Origin {
    /// Canonical rendering from the lexicon
    Lexicon,
    /// Assembled from romanization rules
    Phonetic,
    /// Copied from the input unchanged
    #[default]
    Verbatim,
}

/// A single token produced by the transliterator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The raw text of the token
    pub text: String,

    /// Starting byte offset in the original string
    pub start: usize,

    /// Length in bytes
    pub len: usize,

    /// The classification of this token
    pub kind: TokenKind,

    /// Byte length of the whitespace run immediately before this token
    pub ws_before: usize,

    /// Byte length of the whitespace run immediately after this token
    pub ws_after: usize,

    /// The text emitted for this token
    pub rendered: String,

    /// How `rendered` was produced
    pub origin: Origin,

    /// Tag from the lexicon entry (if any)
    pub tag: Option<String>,

    /// Frequency from the lexicon entry (if any)
    pub freq: Option<u32>,

    /// Why a Latin word was left unconverted (if it was)
    pub reason: Option<PassthroughReason>,
}

impl Token {
    /// Create a verbatim token with text and position
    pub fn with_text(text: String, start: usize, len: usize, kind: TokenKind) -> Self {
        Token {
            rendered: text.clone(),
            text,
            start,
            len,
            kind,
            ..Default::default()
        }
    }

    /// End byte offset (exclusive) in the original string
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Check if this token was converted to Sinhala
    pub fn is_converted(&self) -> bool {
        self.origin != Origin::Verbatim
    }

    /// Check if this is a whitespace token
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Check if this token contains a line break
    pub fn has_line_break(&self) -> bool {
        self.is_whitespace() && self.text.contains('\n')
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)?;
        if self.is_converted() {
            write!(f, "/{}", self.rendered)?;
        }
        Ok(())
    }
}
