//! Live, keystroke-driven conversion.
//!
//! A [`LiveSession`] owns the text being typed. Every edit bumps the
//! revision, and the output is always recomputed from the whole buffer,
//! so deleted text can never leave fragments behind. Per-word conversions
//! are memoized because most keystrokes only change the last word.

use std::collections::HashMap;
use tracing::trace;

use crate::reassembler::{reassemble, ConversionResult};
use crate::token::Token;
use crate::transliterator::{Transliterator, WordConversion};

/// Default number of memoized word conversions
pub const DEFAULT_MEMO_CAPACITY: usize = 4096;

/// Output of a session at a given revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub revision: u64,
    pub output: String,
}

impl Snapshot {
    /// Check if the snapshot still reflects the session's buffer
    pub fn is_current(&self, session: &LiveSession) -> bool {
        self.revision == session.revision()
    }
}

/// An editable input buffer with live conversion
#[derive(Debug, Clone)]
pub struct LiveSession {
    engine: Transliterator,
    buffer: String,
    revision: u64,
    memo: HashMap<String, WordConversion>,
    memo_capacity: usize,
    last: Option<(u64, ConversionResult)>,
}

impl LiveSession {
    /// Create an empty session
    pub fn new(engine: Transliterator) -> Self {
        LiveSession::with_capacity(engine, DEFAULT_MEMO_CAPACITY)
    }

    /// Create an empty session with a given memo capacity
    pub fn with_capacity(engine: Transliterator, memo_capacity: usize) -> Self {
        LiveSession {
            engine,
            buffer: String::new(),
            revision: 0,
            memo: HashMap::new(),
            memo_capacity: memo_capacity.max(1),
            last: None,
        }
    }

    /// The current input text
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Revision counter, incremented by every edit that changes the buffer
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of memoized word conversions
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    /// Append text at the end of the buffer
    pub fn insert_str(&mut self, text: &str) -> u64 {
        if text.is_empty() {
            return self.revision;
        }
        self.buffer.push_str(text);
        self.bump()
    }

    /// Append one typed character
    pub fn push_char(&mut self, c: char) -> u64 {
        self.buffer.push(c);
        self.bump()
    }

    /// Delete up to `n` characters from the end, returning how many were deleted
    pub fn backspace(&mut self, n: usize) -> usize {
        let mut deleted = 0;
        while deleted < n && self.buffer.pop().is_some() {
            deleted += 1;
        }
        if deleted > 0 {
            self.bump();
        }
        deleted
    }

    /// Replace the whole buffer
    pub fn replace(&mut self, text: &str) -> u64 {
        if self.buffer == text {
            return self.revision;
        }
        self.buffer.clear();
        self.buffer.push_str(text);
        self.bump()
    }

    /// Empty the buffer
    pub fn clear(&mut self) -> u64 {
        if self.buffer.is_empty() {
            return self.revision;
        }
        self.buffer.clear();
        self.bump()
    }

    /// Tokens for the current buffer
    pub fn tokens(&mut self) -> Vec<Token> {
        let engine = &self.engine;
        let memo = &mut self.memo;
        let capacity = self.memo_capacity;

        engine.tokenize_with(&self.buffer, |word| {
            if let Some(hit) = memo.get(word) {
                return hit.clone();
            }
            if memo.len() >= capacity {
                trace!(entries = memo.len(), "clearing word memo");
                memo.clear();
            }
            let conversion = engine.convert_word(word);
            memo.insert(word.to_string(), conversion.clone());
            conversion
        })
    }

    /// Converted output for the current buffer
    pub fn output_detailed(&mut self) -> ConversionResult {
        if let Some((revision, ref result)) = self.last {
            if revision == self.revision {
                return result.clone();
            }
        }
        let result = reassemble(&self.tokens());
        self.last = Some((self.revision, result.clone()));
        result
    }

    /// Converted output string for the current buffer
    pub fn output(&mut self) -> String {
        self.output_detailed().as_string()
    }

    /// Output tagged with the revision it was computed at
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot {
            output: self.output(),
            revision: self.revision,
        }
    }
}
