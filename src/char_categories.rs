//! Character classification for mixed Singlish / Sinhala text.
//!
//! Every character of the input is assigned a [`CharCategory`] which the
//! chunker uses to find word, numeral, punctuation and whitespace boundaries.

/// Character categories used when chunking input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharCategory {
    /// Latin letter (ASCII or accented), the raw material of Singlish words
    Latin,
    /// Sinhala code point (U+0D80..=U+0DFF)
    Sinhala,
    /// Zero width joiner / non-joiner, only meaningful inside Sinhala runs
    Joiner,
    /// ASCII digit
    Digit,
    /// Space-like character (spaces, tabs, line breaks)
    Whitespace,
    /// Punctuation mark
    Punct,
    /// Symbol (currency signs, @, %, math operators, ...)
    Symbol,
    /// Anything else: other scripts, emoji
    #[default]
    Other,
}

impl CharCategory {
    /// Check if this category is carried verbatim as punctuation
    pub fn is_punct_like(&self) -> bool {
        matches!(self, CharCategory::Punct | CharCategory::Symbol)
    }

    /// Check if this category belongs inside a Sinhala run
    pub fn is_sinhala_part(&self) -> bool {
        matches!(self, CharCategory::Sinhala | CharCategory::Joiner)
    }
}

/// Start of the Sinhala Unicode block
pub const SINHALA_START: char = '\u{0D80}';
/// End of the Sinhala Unicode block
pub const SINHALA_END: char = '\u{0DFF}';

const ZWJ: char = '\u{200D}';
const ZWNJ: char = '\u{200C}';

/// Characters treated as whitespace in addition to `char::is_whitespace`
const EXTRA_SPACE_CHARS: &[char] = &[
    '\u{200B}', // ZERO WIDTH SPACE
    '\u{FEFF}', // ZERO WIDTH NO-BREAK SPACE
];

/// Check if a character is in the Sinhala block
pub fn is_sinhala(c: char) -> bool {
    (SINHALA_START..=SINHALA_END).contains(&c)
}

/// Check if a character is a vowel letter of the romanization
pub fn is_latin_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Get the category of a character
pub fn get_char_category(c: char) -> CharCategory {
    if c.is_whitespace() || EXTRA_SPACE_CHARS.contains(&c) {
        return CharCategory::Whitespace;
    }

    if is_sinhala(c) {
        return CharCategory::Sinhala;
    }

    if c == ZWJ || c == ZWNJ {
        return CharCategory::Joiner;
    }

    if c.is_ascii_digit() {
        return CharCategory::Digit;
    }

    if c.is_ascii_alphabetic() {
        return CharCategory::Latin;
    }

    if c.is_ascii_punctuation() {
        return match c {
            '$' | '%' | '&' | '*' | '+' | '<' | '=' | '>' | '@' | '^' | '|' | '~' | '#' | '`' => {
                CharCategory::Symbol
            }
            _ => CharCategory::Punct,
        };
    }

    // Latin-1 Supplement letters, Latin Extended-A/B, Latin Extended Additional
    if c.is_alphabetic()
        && (('\u{00C0}'..='\u{024F}').contains(&c) || ('\u{1E00}'..='\u{1EFF}').contains(&c))
    {
        return CharCategory::Latin;
    }

    // General punctuation (dashes, quotes, ellipsis) and Latin-1 punctuation
    if ('\u{2010}'..='\u{205E}').contains(&c) || ('\u{00A1}'..='\u{00BF}').contains(&c) {
        return match c {
            '\u{00A2}'..='\u{00A5}' | '\u{00A9}' | '\u{00AE}' | '\u{00B0}' | '\u{00B1}' => {
                CharCategory::Symbol
            }
            _ => CharCategory::Punct,
        };
    }

    // Currency symbols (€, ₹, ...)
    if ('\u{20A0}'..='\u{20CF}').contains(&c) {
        return CharCategory::Symbol;
    }

    CharCategory::Other
}

/// A string with category information for each character
#[derive(Debug, Clone)]
pub struct SiString {
    /// The original string
    pub string: String,
    /// Category for each character (by char index)
    pub categories: Vec<CharCategory>,
}

impl SiString {
    /// Create a new SiString from a string
    pub fn new(s: &str) -> Self {
        let categories: Vec<CharCategory> = s.chars().map(get_char_category).collect();
        SiString {
            string: s.to_string(),
            categories,
        }
    }

    /// Get the length (number of characters)
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Get the category at a specific index
    pub fn get_category(&self, idx: usize) -> Option<CharCategory> {
        self.categories.get(idx).copied()
    }
}
