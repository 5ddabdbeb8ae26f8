//! Passthrough classification for Latin words.
//!
//! Decides which Latin words inside Singlish text are English, brands,
//! places or acronyms and must be emitted exactly as typed.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::char_categories::is_latin_vowel;
use crate::error::{Error, Result};

/// Embedded default allow-list
pub static DEFAULT_PASSTHROUGH_TXT: &str = include_str!("data/passthrough.txt");

static BUILTIN_PASSTHROUGH: Lazy<PassthroughList> = Lazy::new(|| {
    let mut list = PassthroughList::new();
    list.load_text(DEFAULT_PASSTHROUGH_TXT);
    debug!(words = list.len(), "loaded built-in passthrough list");
    list
});

/// Minimum length of an all-caps word treated as an acronym
const MIN_ACRONYM_LEN: usize = 2;

/// Why a Latin word was left unconverted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassthroughReason {
    /// Listed on the allow-list
    AllowList,
    /// All-caps acronym such as PIN or OTP
    Acronym,
    /// Contains no vowel letter (`xxxxx`, `hmm`)
    NoVowel,
    /// Contains letters outside the romanization alphabet
    Foreign,
    /// No romanization rule applied
    Unmapped,
}

impl PassthroughReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassthroughReason::AllowList => "allow-list",
            PassthroughReason::Acronym => "acronym",
            PassthroughReason::NoVowel => "no-vowel",
            PassthroughReason::Foreign => "foreign",
            PassthroughReason::Unmapped => "unmapped",
        }
    }
}

/// Check if a word is an all-caps acronym
pub fn is_acronym(word: &str) -> bool {
    word.chars().count() >= MIN_ACRONYM_LEN && word.chars().all(|c| c.is_ascii_uppercase())
}

/// Check if a word contains a vowel letter
pub fn has_vowel(word: &str) -> bool {
    word.chars().any(is_latin_vowel)
}

/// Case-insensitive set of words that are never transliterated
#[derive(Debug, Clone, Default)]
pub struct PassthroughList {
    words: HashSet<String>,
}

impl PassthroughList {
    /// Create an empty list
    pub fn new() -> Self {
        PassthroughList::default()
    }

    /// A copy of the built-in allow-list
    pub fn builtin() -> Self {
        BUILTIN_PASSTHROUGH.clone()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Add a word
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
    }

    /// Remove a word
    pub fn remove(&mut self, word: &str) -> bool {
        self.words.remove(&word.to_lowercase())
    }

    /// Check if a word is listed
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Merge another list into this one
    pub fn extend(&mut self, other: PassthroughList) {
        self.words.extend(other.words);
    }

    /// Load words from text, one per line. `#` starts a comment and a
    /// leading `-` removes a word. Returns the number of words added.
    pub fn load_text(&mut self, content: &str) -> usize {
        let mut loaded = 0;

        for line in content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if let Some(word) = line.strip_prefix('-') {
                self.remove(word.trim());
            } else if self.insert(line) {
                loaded += 1;
            }
        }

        loaded
    }

    /// Load words from a file
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let loaded = self.load_text(&content);
        debug!(path = %path.display(), words = loaded, "loaded passthrough file");
        Ok(loaded)
    }

    /// Classify a Latin word that had no lexicon entry.
    ///
    /// Returns `None` if the word should go to the phonetic mapper.
    /// The `Unmapped` reason is only known after mapping and is never
    /// returned here.
    pub fn classify(&self, word: &str) -> Option<PassthroughReason> {
        if self.contains(word) {
            Some(PassthroughReason::AllowList)
        } else if is_acronym(word) {
            Some(PassthroughReason::Acronym)
        } else if !word.is_ascii() {
            Some(PassthroughReason::Foreign)
        } else if !has_vowel(word) {
            Some(PassthroughReason::NoVowel)
        } else {
            None
        }
    }
}
