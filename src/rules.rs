//! Romanization rule table.
//!
//! Maps Latin grapheme sequences to Sinhala script units. Rules live in a
//! character trie so the phonetic mapper always takes the longest key that
//! matches: `dh` never splits into `d` + `h`, `aee` never into `ae` + `e`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::trie::Trie;

/// Embedded default rule table
pub static DEFAULT_RULES_TSV: &str = include_str!("data/rules.tsv");

/// Marker used in the TSV sign column for the inherent vowel
const INHERENT_SIGN: &str = "-";

/// Built-in rule table, parsed on first use
static BUILTIN_RULES: Lazy<RuleTable> = Lazy::new(|| {
    let mut table = RuleTable::new();
    let loaded = table.load_tsv(DEFAULT_RULES_TSV);
    debug!(rules = loaded, "loaded built-in romanization rules");
    table
});

/// The kind of Sinhala unit a rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// Base consonant letter, written with a pending al-lakuna
    Consonant,
    /// Vowel with independent and dependent (sign) forms
    Vowel,
    /// Anusvara / visarga, appended after the current syllable
    Modifier,
}

impl RuleKind {
    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "consonant" => Some(RuleKind::Consonant),
            "vowel" => Some(RuleKind::Vowel),
            "modifier" => Some(RuleKind::Modifier),
            _ => None,
        }
    }
}

/// A single romanization rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomanizationRule {
    /// Latin key, e.g. "dh" or "aa"
    pub latin: String,
    /// What the rule produces
    pub kind: RuleKind,
    /// Base letter for consonants and modifiers, independent letter for vowels
    pub letter: String,
    /// Dependent vowel sign (empty for the inherent vowel and non-vowels)
    pub sign: String,
}

impl RomanizationRule {
    /// Create a consonant rule
    pub fn consonant(latin: &str, letter: &str) -> Self {
        RomanizationRule {
            latin: latin.to_string(),
            kind: RuleKind::Consonant,
            letter: letter.to_string(),
            sign: String::new(),
        }
    }

    /// Create a vowel rule
    pub fn vowel(latin: &str, letter: &str, sign: &str) -> Self {
        RomanizationRule {
            latin: latin.to_string(),
            kind: RuleKind::Vowel,
            letter: letter.to_string(),
            sign: sign.to_string(),
        }
    }

    /// Whether the key spans more than one Latin character
    pub fn is_digraph(&self) -> bool {
        self.latin.chars().count() > 1
    }

    /// Whether the key only matches case-significant input
    pub fn is_case_marked(&self) -> bool {
        self.latin.chars().any(|c| c.is_uppercase())
    }

    /// Parse one TSV line (`latin<TAB>kind<TAB>letter[<TAB>sign]`)
    fn from_tsv_line(line: &str) -> std::result::Result<Self, String> {
        let parts: Vec<&str> = line.split('\t').map(str::trim).collect();
        if parts.len() < 3 {
            return Err(format!("expected at least 3 columns, got {}", parts.len()));
        }

        let latin = parts[0];
        if latin.is_empty() || !latin.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("key {:?} must be ASCII letters", latin));
        }

        let kind = RuleKind::parse(parts[1])
            .ok_or_else(|| format!("unknown rule kind {:?}", parts[1]))?;

        let letter = parts[2];
        if letter.is_empty() {
            return Err(format!("empty letter for key {:?}", latin));
        }

        let sign = match kind {
            RuleKind::Vowel => match parts.get(3).copied() {
                Some(INHERENT_SIGN) => "",
                Some(s) if !s.is_empty() => s,
                _ => return Err(format!("vowel {:?} needs a sign column", latin)),
            },
            _ => "",
        };

        Ok(RomanizationRule {
            latin: latin.to_string(),
            kind,
            letter: letter.to_string(),
            sign: sign.to_string(),
        })
    }
}

/// A priority-ordered set of romanization rules
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    trie: Trie<char, RomanizationRule>,
    /// Uppercase characters that start or appear in case-marked keys
    case_marked: HashSet<char>,
}

impl RuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        RuleTable::default()
    }

    /// A copy of the built-in table
    pub fn builtin() -> Self {
        BUILTIN_RULES.clone()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Check if the table has no rules
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Add a rule, replacing any rule with the same key
    pub fn insert(&mut self, rule: RomanizationRule) {
        self.case_marked
            .extend(rule.latin.chars().filter(|c| c.is_uppercase()));
        let key: Vec<char> = rule.latin.chars().collect();
        self.trie.add(key, Some(rule));
    }

    /// Remove the rule with the given key
    pub fn remove(&mut self, latin: &str) -> bool {
        let key: Vec<char> = latin.chars().collect();
        self.trie.deactivate(&key)
    }

    /// Get the rule for an exact key
    pub fn get(&self, latin: &str) -> Option<&RomanizationRule> {
        let key: Vec<char> = latin.chars().collect();
        self.trie.get(&key)
    }

    /// Check if an uppercase character has any case-marked rule
    pub fn is_case_marked(&self, c: char) -> bool {
        self.case_marked.contains(&c)
    }

    /// Find the longest rule whose key is a prefix of `input`.
    ///
    /// Returns the number of characters consumed and the rule.
    pub fn longest_match(&self, input: &[char]) -> Option<(usize, &RomanizationRule)> {
        self.trie.longest_prefix(input)
    }

    /// Load rules from TSV content, returning the number of rules loaded.
    ///
    /// Later rules override earlier ones with the same key. A line
    /// `-latin` removes a rule. Malformed lines are skipped.
    pub fn load_tsv(&mut self, tsv_content: &str) -> usize {
        let mut loaded = 0;

        for (line_no, line) in tsv_content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(latin) = trimmed.strip_prefix('-') {
                self.remove(latin.trim());
                continue;
            }

            match RomanizationRule::from_tsv_line(trimmed) {
                Ok(rule) => {
                    self.insert(rule);
                    loaded += 1;
                }
                Err(reason) => {
                    warn!(line = line_no + 1, %reason, "skipping malformed rule");
                }
            }
        }

        loaded
    }

    /// Load rules from a TSV file
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let loaded = self.load_tsv(&content);
        debug!(path = %path.display(), rules = loaded, "loaded rule file");
        Ok(loaded)
    }
}
