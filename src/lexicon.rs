//! Singlish lexicon: canonical renderings for words and phrases.
//!
//! Entries are stored in a trie keyed by case-folded words, so a phrase
//! like `bohoma sthuthi` is a two-step path. The transliterator walks it
//! across whitespace and keeps the longest entry found.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::char_categories::{get_char_category, CharCategory};
use crate::error::{Error, Result};
use crate::trie::Trie;

/// Embedded default lexicon
pub static DEFAULT_LEXICON_TSV: &str = include_str!("data/lexicon.tsv");

static BUILTIN_LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    let mut builder = LexiconBuilder::new();
    builder.load_tsv(DEFAULT_LEXICON_TSV);
    let lexicon = builder.build();
    debug!(entries = lexicon.len(), "loaded built-in lexicon");
    lexicon
});

/// A lexicon entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Case-folded Singlish form, words separated by single spaces
    pub form: String,
    /// Sinhala rendering, one element per form word
    pub rendering: Vec<String>,
    /// Optional tag (part of speech, PHRASE, ...)
    pub tag: Option<String>,
    /// Optional usage frequency
    pub freq: Option<u32>,
}

impl LexiconEntry {
    /// Create an entry from a form and a space-separated rendering
    pub fn new(form: &str, rendering: &str) -> Self {
        LexiconEntry {
            form: form
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join(" "),
            rendering: rendering.split_whitespace().map(String::from).collect(),
            ..Default::default()
        }
    }

    /// Number of words in the form
    pub fn word_count(&self) -> usize {
        self.form.split(' ').count()
    }

    /// Check if the entry spans more than one word
    pub fn is_phrase(&self) -> bool {
        self.word_count() > 1
    }

    /// The rendering joined with single spaces
    pub fn rendering_text(&self) -> String {
        self.rendering.join(" ")
    }

    /// Parse one TSV line (`form<TAB>rendering[<TAB>tag[<TAB>freq]]`)
    fn from_tsv_line(line: &str) -> std::result::Result<Self, String> {
        let parts: Vec<&str> = line.split('\t').map(str::trim).collect();
        if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err("expected form and rendering columns".to_string());
        }

        let mut entry = LexiconEntry::new(parts[0], parts[1]);

        let bad_char = entry
            .form
            .chars()
            .find(|&c| c != ' ' && get_char_category(c) != CharCategory::Latin);
        if let Some(c) = bad_char {
            return Err(format!("form {:?} contains non-letter {:?}", entry.form, c));
        }

        if entry.rendering.len() != entry.word_count() {
            return Err(format!(
                "form {:?} has {} words but rendering has {}",
                entry.form,
                entry.word_count(),
                entry.rendering.len()
            ));
        }

        entry.tag = parts
            .get(2)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        entry.freq = parts.get(3).and_then(|s| s.parse::<u32>().ok());

        Ok(entry)
    }
}

/// A lexicon of Singlish words and phrases
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    trie: Trie<String, LexiconEntry>,
}

impl Lexicon {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Lexicon::default()
    }

    /// A copy of the built-in lexicon
    pub fn builtin() -> Self {
        BUILTIN_LEXICON.clone()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Check if the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Add an entry, replacing any entry with the same form
    pub fn insert(&mut self, entry: LexiconEntry) {
        let path: Vec<String> = entry.form.split(' ').map(String::from).collect();
        self.trie.add(path, Some(entry));
    }

    /// Get the entry for an exact form (case-insensitive)
    pub fn get(&self, form: &str) -> Option<&LexiconEntry> {
        let path: Vec<String> = form.split_whitespace().map(str::to_lowercase).collect();
        self.trie.get(path.iter().map(String::as_str))
    }

    /// Remove an entry so it is no longer matched
    pub fn deactivate(&mut self, form: &str) -> bool {
        let path: Vec<String> = form.split_whitespace().map(str::to_lowercase).collect();
        self.trie.deactivate(path.iter().map(String::as_str))
    }

    /// Find the longest entry matching a prefix of `words`.
    ///
    /// Words must already be case-folded. The iterator is consumed only as
    /// far as the trie has a path, so it can be lazy. Returns the number of
    /// words consumed and the entry.
    pub fn longest_match<I, S>(&self, words: I) -> Option<(usize, &LexiconEntry)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = None;
        let mut best = None;

        for (depth, word) in words.into_iter().enumerate() {
            let Some(node) = self.trie.walk(word.as_ref(), current) else {
                break;
            };
            if node.is_match() {
                if let Some(ref entry) = node.data {
                    best = Some((depth + 1, entry));
                }
            }
            if !node.can_walk() {
                break;
            }
            current = Some(node);
        }

        best
    }

    /// Merge all entries of `other` into this lexicon
    pub fn extend(&mut self, other: Lexicon) {
        let mut stack = vec![other.trie.root().clone()];
        while let Some(node) = stack.pop() {
            if let Some(entry) = node.data {
                self.insert(entry);
            }
            stack.extend(node.children.into_values());
        }
    }
}

/// Builds a [`Lexicon`] from TSV sources
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    lexicon: Lexicon,
}

impl LexiconBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        LexiconBuilder {
            lexicon: Lexicon::new(),
        }
    }

    /// Start from an existing lexicon
    pub fn from_lexicon(lexicon: Lexicon) -> Self {
        LexiconBuilder { lexicon }
    }

    /// Load entries from TSV content, returning how many were added.
    ///
    /// A line starting with `-` deactivates the form that follows it.
    pub fn load_tsv(&mut self, tsv_content: &str) -> usize {
        let mut loaded = 0;

        for (line_no, line) in tsv_content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(form) = line.strip_prefix('-') {
                if !self.lexicon.deactivate(form) {
                    debug!(form = form.trim(), "nothing to deactivate");
                }
                continue;
            }

            match LexiconEntry::from_tsv_line(line) {
                Ok(entry) => {
                    self.lexicon.insert(entry);
                    loaded += 1;
                }
                Err(reason) => {
                    warn!(line = line_no + 1, %reason, "skipping malformed lexicon entry");
                }
            }
        }

        loaded
    }

    /// Load entries from a TSV file
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let loaded = self.load_tsv(&content);
        debug!(path = %path.display(), entries = loaded, "loaded lexicon file");
        Ok(loaded)
    }

    /// Finish building
    pub fn build(self) -> Lexicon {
        self.lexicon
    }
}
