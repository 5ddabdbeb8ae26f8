//! Error types for singlish-rs
//!
//! Conversion itself never fails. Errors come from loading data files,
//! configuration and lexicon packs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading engine data
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Lexicon pack not found: {0}")]
    PackNotFound(String),
}

impl Error {
    /// Wrap an IO error with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
