//! # singlish-rs
//!
//! A fast, real-time Singlish (romanized Sinhala) to Sinhala script
//! transliterator written in Rust.
//!
//! Romanized Sinhala words are converted with a longest-match romanization
//! rule table and a lexicon of canonical spellings. English words, brand
//! names, acronyms, numerals, symbols and whitespace are left exactly as
//! typed.
//!
//! ## Quick Start
//!
//! ```rust
//! use singlish_rs::Transliterator;
//!
//! let engine = Transliterator::new();
//! assert_eq!(engine.convert("mama mal kadanavaa"), "මම මල් කඩනවා");
//! assert_eq!(engine.convert("mata help ekak oonee"), "මට help එකක් ඕනේ");
//! ```
//!
//! ## Live Typing
//!
//! A [`LiveSession`] re-converts the whole buffer after every edit, so the
//! output never keeps fragments of deleted text:
//!
//! ```rust
//! use singlish_rs::{LiveSession, Transliterator};
//!
//! let mut session = LiveSession::new(Transliterator::new());
//! session.insert_str("heta yanavaa");
//! session.backspace(8);
//! assert_eq!(session.output(), "හෙට");
//! ```
//!
//! ## Tokens
//!
//! ```rust
//! use singlish_rs::{TokenKind, Transliterator};
//!
//! let tokens = Transliterator::new().tokenize("Rs10000 FYI");
//! assert_eq!(tokens[0].kind, TokenKind::Numeral);
//! assert_eq!(tokens[2].kind, TokenKind::LatinPassthrough);
//! ```

pub mod char_categories;
pub mod chunker;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod pack;
pub mod passthrough;
pub mod phonetic;
pub mod reassembler;
pub mod rules;
pub mod session;
pub mod token;
pub mod transliterator;
pub mod trie;

// Re-export main types for convenience
pub use char_categories::{get_char_category, CharCategory, SiString};
pub use chunker::{Chunk, ChunkType, Chunker};
pub use config::Config;
pub use error::{Error, Result};
pub use lexicon::{Lexicon, LexiconBuilder, LexiconEntry};
pub use pack::{EngineData, PackSummary};
pub use passthrough::{PassthroughList, PassthroughReason};
pub use phonetic::{MapperOptions, PhoneticMapper, PhoneticOutput};
pub use reassembler::{reassemble, ConversionResult, Segment};
pub use rules::{RomanizationRule, RuleKind, RuleTable};
pub use session::{LiveSession, Snapshot};
pub use token::{Origin, Token, TokenKind};
pub use transliterator::{EngineOptions, Transliterator, WordConversion};
pub use trie::{Trie, TrieNode};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert text with the built-in data
pub fn convert(text: &str) -> String {
    Transliterator::new().convert(text)
}
