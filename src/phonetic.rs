//! Phonetic assembly of Sinhala script from Singlish words.
//!
//! The mapper walks a word left to right, taking the longest romanization
//! rule at each position. Consonants are written with a pending al-lakuna
//! that a following vowel replaces with its dependent sign.

use std::sync::Arc;

use crate::char_categories::is_latin_vowel;
use crate::rules::{RomanizationRule, RuleKind, RuleTable};

/// Al-lakuna (virama), kills the inherent vowel of a consonant
pub const AL_LAKUNA: char = '\u{0DCA}';

/// Zero width joiner, forms rakaransaya / yansaya conjuncts
pub const ZWJ: char = '\u{200D}';

const RAYANNA: &str = "ර";
const YAYANNA: &str = "ය";

/// Minimum run of one vowel letter treated as emphatic stretching
const ELONGATION_RUN: usize = 3;

/// Options controlling how words are normalized before mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperOptions {
    /// Collapse runs of 3+ identical vowel letters to one
    pub collapse_elongation: bool,
    /// Let uppercase letters select case-marked rules (L, N, G, ...)
    pub case_marked_rules: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        MapperOptions {
            collapse_elongation: true,
            case_marked_rules: true,
        }
    }
}

/// The result of mapping one word
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneticOutput {
    /// Assembled text: Sinhala with any unmatched Latin left literal
    pub text: String,
    /// Number of input characters consumed by rules
    pub matched: usize,
    /// Number of input characters no rule applied to
    pub unmatched: usize,
}

impl PhoneticOutput {
    /// Whether at least one rule applied
    pub fn has_matches(&self) -> bool {
        self.matched > 0
    }

    /// Whether every character was converted
    pub fn is_complete(&self) -> bool {
        self.unmatched == 0
    }
}

/// Check if a word looks randomly capitalized ("mAmA", "YaNaVaA").
///
/// Such words carry no case information and are folded completely.
pub fn is_randomly_capitalized(word: &str) -> bool {
    word.chars()
        .skip(1)
        .any(|c| c.is_uppercase() && is_latin_vowel(c))
}

/// Case-folded lookup key for a word, with elongation collapsed.
///
/// Lexicon and allow-list lookups use this key so that "Oyata" and
/// "kohomadaaaa" find the entries for "oyata" and "kohomada".
pub fn lookup_key(word: &str, collapse_elongation: bool) -> String {
    let folded: Vec<char> = word.chars().map(fold_char).collect();
    if !collapse_elongation {
        return folded.into_iter().collect();
    }

    let mut key = String::with_capacity(word.len());
    let mut i = 0;
    while i < folded.len() {
        let c = folded[i];
        let mut j = i + 1;
        while j < folded.len() && folded[j] == c {
            j += 1;
        }
        if is_latin_vowel(c) && j - i >= ELONGATION_RUN {
            key.push(c);
        } else {
            key.extend(&folded[i..j]);
        }
        i = j;
    }
    key
}

fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// A word prepared for rule matching, one entry per input character
#[derive(Debug, Default)]
struct Prepared {
    /// Characters as typed
    original: Vec<char>,
    /// Case-significant form: case-marked uppercase kept, rest folded
    marked: Vec<char>,
    /// Fully lowercase form
    folded: Vec<char>,
}

/// Maps Singlish words to Sinhala script using a rule table
#[derive(Debug, Clone)]
pub struct PhoneticMapper {
    rules: Arc<RuleTable>,
    options: MapperOptions,
}

impl PhoneticMapper {
    /// Create a mapper with default options
    pub fn new(rules: Arc<RuleTable>) -> Self {
        PhoneticMapper::with_options(rules, MapperOptions::default())
    }

    /// Create a mapper with explicit options
    pub fn with_options(rules: Arc<RuleTable>, options: MapperOptions) -> Self {
        PhoneticMapper { rules, options }
    }

    /// A mapper sharing this one's rule table with different options
    pub fn configured(&self, options: MapperOptions) -> Self {
        PhoneticMapper {
            rules: Arc::clone(&self.rules),
            options,
        }
    }

    /// Get a reference to the rule table
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Get the mapper options
    pub fn options(&self) -> MapperOptions {
        self.options
    }

    fn prepare(&self, word: &str) -> Prepared {
        let fold_all = !self.options.case_marked_rules || is_randomly_capitalized(word);
        let mut prepared = Prepared::default();

        for (i, c) in word.chars().enumerate() {
            let folded = fold_char(c);
            let marked = if fold_all || i == 0 || !self.rules.is_case_marked(c) {
                folded
            } else {
                c
            };
            prepared.original.push(c);
            prepared.marked.push(marked);
            prepared.folded.push(folded);
        }

        if self.options.collapse_elongation {
            collapse_elongation(&mut prepared);
        }

        prepared
    }

    fn next_rule(&self, prepared: &Prepared, i: usize) -> Option<(usize, &RomanizationRule)> {
        self.rules
            .longest_match(&prepared.marked[i..])
            .or_else(|| self.rules.longest_match(&prepared.folded[i..]))
    }

    /// Map a single word to Sinhala script.
    ///
    /// Characters that no rule covers are copied through literally.
    pub fn map_word(&self, word: &str) -> PhoneticOutput {
        let prepared = self.prepare(word);
        let mut output = PhoneticOutput {
            text: String::with_capacity(word.len() * 3),
            ..Default::default()
        };
        // Letter of the consonant whose al-lakuna is still open
        let mut pending: Option<&str> = None;
        let mut i = 0;

        while i < prepared.folded.len() {
            let Some((len, rule)) = self.next_rule(&prepared, i) else {
                output.text.push(prepared.original[i]);
                output.unmatched += 1;
                pending = None;
                i += 1;
                continue;
            };

            match rule.kind {
                RuleKind::Consonant => {
                    if let Some(prev) = pending {
                        let forms_conjunct = rule.letter == RAYANNA || rule.letter == YAYANNA;
                        if forms_conjunct && prev != RAYANNA && prev != YAYANNA {
                            output.text.push(ZWJ);
                        }
                    }
                    output.text.push_str(&rule.letter);
                    output.text.push(AL_LAKUNA);
                    pending = Some(rule.letter.as_str());
                }
                RuleKind::Vowel => {
                    if pending.is_some() {
                        output.text.pop();
                        output.text.push_str(&rule.sign);
                    } else {
                        output.text.push_str(&rule.letter);
                    }
                    pending = None;
                }
                RuleKind::Modifier => {
                    if pending.is_some() {
                        output.text.pop();
                    }
                    output.text.push_str(&rule.letter);
                    pending = None;
                }
            }

            output.matched += len;
            i += len;
        }

        output
    }
}

/// Drop all but the first letter of each run of 3+ identical vowels
fn collapse_elongation(prepared: &mut Prepared) {
    let n = prepared.folded.len();
    let mut keep = vec![true; n];
    let mut i = 0;

    while i < n {
        let c = prepared.folded[i];
        let mut j = i + 1;
        while j < n && prepared.folded[j] == c {
            j += 1;
        }
        if is_latin_vowel(c) && j - i >= ELONGATION_RUN {
            keep[i + 1..j].iter_mut().for_each(|k| *k = false);
        }
        i = j;
    }

    if keep.iter().all(|&k| k) {
        return;
    }

    let retain = |chars: &mut Vec<char>| {
        let mut idx = 0;
        chars.retain(|_| {
            let k = keep[idx];
            idx += 1;
            k
        });
    };
    retain(&mut prepared.original);
    retain(&mut prepared.marked);
    retain(&mut prepared.folded);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> PhoneticMapper {
        PhoneticMapper::new(Arc::new(RuleTable::builtin()))
    }

    fn map(word: &str) -> String {
        mapper().map_word(word).text
    }

    #[test]
    fn test_inherent_and_final_consonant() {
        assert_eq!(map("mama"), "මම");
        assert_eq!(map("mal"), "මල්");
        assert_eq!(map("ekak"), "එකක්");
    }

    #[test]
    fn test_long_vowels() {
        assert_eq!(map("kadanavaa"), "කඩනවා");
        assert_eq!(map("saniipa"), "සනීප");
        assert_eq!(map("oonee"), "ඕනේ");
        assert_eq!(map("ekea"), "එකේ");
    }

    #[test]
    fn test_aspirate_digraphs() {
        assert_eq!(map("gedhara"), "ගෙදර");
        assert_eq!(map("thaaththaa"), "තාත්තා");
        assert_eq!(map("edhdhi"), "එද්දි");
    }

    #[test]
    fn test_ae_vowels() {
        assert_eq!(map("naethi"), "නැති");
        assert_eq!(map("vaessa"), "වැස්ස");
    }

    #[test]
    fn test_case_marked_letters() {
        assert_eq!(map("iiLaGa"), "ඊළඟ");
        assert_eq!(map("vikuNalaa"), "විකුණලා");
        assert_eq!(map("puLuvandha"), "පුළුවන්ද");
    }

    #[test]
    fn test_sentence_case_is_ignored() {
        assert_eq!(map("Mata"), "මට");
        assert_eq!(map("Oyaa"), "ඔයා");
        assert_eq!(map("Lassana"), map("lassana"));
    }

    #[test]
    fn test_random_capitalization_folds() {
        assert!(is_randomly_capitalized("YaNaVaA"));
        assert!(!is_randomly_capitalized("iiLaGa"));
        assert_eq!(map("mAmA"), "මම");
        assert_eq!(map("gEdHaRa"), "ගෙදර");
        assert_eq!(map("YaNaVaA"), "යනවා");
    }

    #[test]
    fn test_case_marking_disabled() {
        let mapper = PhoneticMapper::with_options(
            Arc::new(RuleTable::builtin()),
            MapperOptions {
                case_marked_rules: false,
                ..Default::default()
            },
        );
        assert_eq!(mapper.map_word("vikuNalaa").text, "විකුනලා");
    }

    #[test]
    fn test_elongation_collapse() {
        assert_eq!(map("kohomadaaaa"), map("kohomada"));
        assert_eq!(map("hariii"), "හරි");
        assert_eq!(map("ithaamath"), "ඉතාමත්");
    }

    #[test]
    fn test_lookup_key() {
        assert_eq!(lookup_key("Oyata", true), "oyata");
        assert_eq!(lookup_key("kohomadaaaa", true), "kohomada");
        assert_eq!(lookup_key("kohomadaaaa", false), "kohomadaaaa");
        assert_eq!(lookup_key("saniipa", true), "saniipa");
        assert_eq!(lookup_key("WhatsApp", true), "whatsapp");
        assert_eq!(lookup_key("HARIIII", true), "hari");
        assert_eq!(lookup_key("mmmm", true), "mmmm");
    }

    #[test]
    fn test_long_runs_fold_in_one_pass() {
        let n = 200_000;
        assert_eq!(lookup_key(&"a".repeat(n), true), "a");
        assert_eq!(lookup_key(&"a".repeat(n), false).len(), n);
        assert_eq!(lookup_key(&"M".repeat(n), true), "m".repeat(n));
    }

    #[test]
    fn test_conjuncts() {
        assert_eq!(map("prashnaya"), "ප්\u{200D}රශ්නය");
        assert_eq!(map("kyaa"), "ක්\u{200D}යා");
        assert_eq!(map("supiriyak"), "සුපිරියක්");
    }

    #[test]
    fn test_anusvara() {
        assert_eq!(map("sax"), "සං");
    }

    #[test]
    fn test_unmatched_literal() {
        let out = mapper().map_word("qa");
        assert_eq!(out.text, "qඅ");
        assert_eq!(out.matched, 1);
        assert_eq!(out.unmatched, 1);
        assert!(out.has_matches());
        assert!(!out.is_complete());
    }

    #[test]
    fn test_long_unmatched_word() {
        let out = mapper().map_word(&"q".repeat(100_000));
        assert_eq!(out.unmatched, 100_000);
        assert!(!out.has_matches());
    }

    #[test]
    fn test_ng_is_not_a_digraph() {
        assert_eq!(map("ekaking"), "එකකින්ග්");
    }
}
