//! Reassembly of token output.
//!
//! Token renderings are concatenated in input order. Nothing is inserted
//! or dropped, so whitespace and line breaks keep their exact positions.

use serde::Serialize;
use std::fmt;

use crate::token::Token;

/// A piece of output text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Output text
    pub text: String,
    /// Whether the text was converted to Sinhala (false: copied verbatim)
    pub converted: bool,
}

/// The output of a conversion as an ordered list of segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub segments: Vec<Segment>,
}

impl ConversionResult {
    /// The full output string
    pub fn as_string(&self) -> String {
        let len = self.segments.iter().map(|s| s.text.len()).sum();
        let mut out = String::with_capacity(len);
        for segment in &self.segments {
            out.push_str(&segment.text);
        }
        out
    }

    /// Check if there is no output
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over converted segments only
    pub fn converted(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.converted)
    }

    /// Iterate over verbatim segments only
    pub fn verbatim(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| !s.converted)
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(&segment.text)?;
        }
        Ok(())
    }
}

/// Concatenate token output into a [`ConversionResult`].
///
/// Adjacent tokens with the same converted status share a segment.
pub fn reassemble(tokens: &[Token]) -> ConversionResult {
    let mut segments: Vec<Segment> = Vec::new();

    for token in tokens {
        let converted = token.is_converted();
        match segments.last_mut() {
            Some(last) if last.converted == converted => last.text.push_str(&token.rendered),
            _ => segments.push(Segment {
                text: token.rendered.clone(),
                converted,
            }),
        }
    }

    ConversionResult { segments }
}
