//! The transliteration pipeline.
//!
//! Text is chunked, Latin words are matched against the lexicon (longest
//! phrase first), then classified as passthrough or mapped phonetically.
//! Every other chunk is carried through verbatim.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

use crate::chunker::{Chunk, ChunkType, Chunker};
use crate::lexicon::{Lexicon, LexiconEntry};
use crate::passthrough::{PassthroughList, PassthroughReason};
use crate::phonetic::{lookup_key, MapperOptions, PhoneticMapper};
use crate::reassembler::{reassemble, ConversionResult};
use crate::rules::RuleTable;
use crate::token::{Origin, Token, TokenKind};

/// Engine switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// NFC-normalize input before chunking
    pub normalize_nfc: bool,
    /// Collapse emphatic vowel stretching (`kohomadaaaa`)
    pub collapse_elongation: bool,
    /// Honour case-marked rules such as `L` and `N`
    pub case_marked_rules: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            normalize_nfc: false,
            collapse_elongation: true,
            case_marked_rules: true,
        }
    }
}

impl EngineOptions {
    fn mapper_options(&self) -> MapperOptions {
        MapperOptions {
            collapse_elongation: self.collapse_elongation,
            case_marked_rules: self.case_marked_rules,
        }
    }
}

/// How a single Latin word outside any lexicon phrase is emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordConversion {
    /// `SinglishWord` or `LatinPassthrough`
    pub kind: TokenKind,
    /// Output text
    pub rendered: String,
    /// Where the output came from
    pub origin: Origin,
    /// Set when the word was left as typed
    pub reason: Option<PassthroughReason>,
}

impl WordConversion {
    fn verbatim(word: &str, reason: PassthroughReason) -> Self {
        WordConversion {
            kind: TokenKind::LatinPassthrough,
            rendered: word.to_string(),
            origin: Origin::Verbatim,
            reason: Some(reason),
        }
    }
}

/// Singlish to Sinhala transliterator.
///
/// Cloning is cheap: the rule table, lexicon and allow-list are shared.
#[derive(Debug, Clone)]
pub struct Transliterator {
    mapper: PhoneticMapper,
    lexicon: Arc<Lexicon>,
    passthrough: Arc<PassthroughList>,
    options: EngineOptions,
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Transliterator {
    /// Create a transliterator with the built-in data
    pub fn new() -> Self {
        Transliterator::with_data(
            RuleTable::builtin(),
            Lexicon::builtin(),
            PassthroughList::builtin(),
        )
    }

    /// Create a transliterator from explicit data
    pub fn with_data(rules: RuleTable, lexicon: Lexicon, passthrough: PassthroughList) -> Self {
        let options = EngineOptions::default();
        Transliterator {
            mapper: PhoneticMapper::with_options(Arc::new(rules), options.mapper_options()),
            lexicon: Arc::new(lexicon),
            passthrough: Arc::new(passthrough),
            options,
        }
    }

    /// Replace the engine options
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.mapper = self.mapper.configured(options.mapper_options());
        self.options = options;
        self
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn rules(&self) -> &RuleTable {
        self.mapper.rules()
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn passthrough(&self) -> &PassthroughList {
        &self.passthrough
    }

    /// Convert text to Sinhala script
    pub fn convert(&self, text: &str) -> String {
        self.convert_detailed(text).as_string()
    }

    /// Convert text, keeping track of which segments were converted
    pub fn convert_detailed(&self, text: &str) -> ConversionResult {
        reassemble(&self.tokenize(text))
    }

    /// Split text into classified, rendered tokens
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenize_with(text, |word| self.convert_word(word))
    }

    /// Tokenize with a custom converter for single Latin words.
    ///
    /// Lexicon matching still runs first; `convert_word` only sees words
    /// that no lexicon entry covers. This is the hook [`LiveSession`] uses
    /// to memoize conversions.
    ///
    /// Token offsets refer to the NFC form of `text` when normalization
    /// is enabled.
    ///
    /// [`LiveSession`]: crate::session::LiveSession
    pub fn tokenize_with<F>(&self, text: &str, mut convert_word: F) -> Vec<Token>
    where
        F: FnMut(&str) -> WordConversion,
    {
        let text: Cow<str> = if self.options.normalize_nfc {
            Cow::Owned(text.nfc().collect())
        } else {
            Cow::Borrowed(text)
        };
        let text: &str = &text;

        let chunks = Chunker::new(text).make_chunks();
        let mut tokens = Vec::with_capacity(chunks.len());
        let mut i = 0;

        while i < chunks.len() {
            let chunk = &chunks[i];

            if chunk.chunk_type != ChunkType::Word {
                tokens.push(Token::with_text(
                    chunk.text(text).to_string(),
                    chunk.start,
                    chunk.len,
                    token_kind(chunk.chunk_type),
                ));
                i += 1;
                continue;
            }

            if let Some((words, entry)) = self.match_lexicon(text, &chunks[i..]) {
                let span = 2 * words - 1;
                tokens.push(lexicon_token(text, &chunks[i..i + span], entry));
                i += span;
                continue;
            }

            let word = chunk.text(text);
            let conversion = convert_word(word);
            let mut token =
                Token::with_text(word.to_string(), chunk.start, chunk.len, conversion.kind);
            token.rendered = conversion.rendered;
            token.origin = conversion.origin;
            token.reason = conversion.reason;
            tokens.push(token);
            i += 1;
        }

        fill_whitespace(&mut tokens);
        tokens
    }

    /// Classify and convert one Latin word, ignoring the lexicon
    pub fn convert_word(&self, word: &str) -> WordConversion {
        if let Some(reason) = self.passthrough.classify(word) {
            return WordConversion::verbatim(word, reason);
        }

        let output = self.mapper.map_word(word);
        if !output.has_matches() {
            return WordConversion::verbatim(word, PassthroughReason::Unmapped);
        }

        WordConversion {
            kind: TokenKind::SinglishWord,
            rendered: output.text,
            origin: Origin::Phonetic,
            reason: None,
        }
    }

    /// Longest lexicon entry starting at `chunks[0]`, crossing only whitespace.
    ///
    /// Returns the number of words matched and the entry.
    fn match_lexicon<'a>(
        &'a self,
        text: &str,
        chunks: &[Chunk],
    ) -> Option<(usize, &'a LexiconEntry)> {
        let collapse = self.options.collapse_elongation;
        let words = chunks
            .iter()
            .enumerate()
            .take_while(|(k, c)| {
                let expected = if k % 2 == 0 {
                    ChunkType::Word
                } else {
                    ChunkType::Space
                };
                c.chunk_type == expected
            })
            .filter(|(k, _)| k % 2 == 0)
            .map(|(_, c)| lookup_key(c.text(text), collapse));

        self.lexicon.longest_match(words)
    }
}

fn token_kind(chunk_type: ChunkType) -> TokenKind {
    match chunk_type {
        ChunkType::Word => TokenKind::SinglishWord,
        ChunkType::Sinhala => TokenKind::SinhalaText,
        ChunkType::Numeral => TokenKind::Numeral,
        ChunkType::Punct => TokenKind::Punctuation,
        ChunkType::Space => TokenKind::Whitespace,
        ChunkType::Other => TokenKind::Other,
    }
}

/// Build the token for a lexicon match spanning `chunks` (words and the
/// whitespace between them). Inner whitespace is kept as typed.
fn lexicon_token(text: &str, chunks: &[Chunk], entry: &LexiconEntry) -> Token {
    let start = chunks[0].start;
    let end = chunks[chunks.len() - 1].end();

    let mut rendered = String::new();
    let mut words = entry.rendering.iter();
    for chunk in chunks {
        match chunk.chunk_type {
            ChunkType::Word => {
                if let Some(word) = words.next() {
                    rendered.push_str(word);
                }
            }
            _ => rendered.push_str(chunk.text(text)),
        }
    }
    // Entries built by hand may carry more rendering words than form words
    for word in words {
        rendered.push(' ');
        rendered.push_str(word);
    }

    let mut token = Token::with_text(
        text[start..end].to_string(),
        start,
        end - start,
        TokenKind::SinglishWord,
    );
    token.rendered = rendered;
    token.origin = Origin::Lexicon;
    token.tag = entry.tag.clone();
    token.freq = entry.freq;
    token
}

/// Record the width of the whitespace runs around each non-space token
fn fill_whitespace(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        if tokens[i].is_whitespace() {
            continue;
        }
        if i > 0 && tokens[i - 1].is_whitespace() {
            tokens[i].ws_before = tokens[i - 1].len;
        }
        if i + 1 < tokens.len() && tokens[i + 1].is_whitespace() {
            tokens[i].ws_after = tokens[i + 1].len;
        }
    }
}
