//! TOML configuration.
//!
//! ```toml
//! [engine]
//! normalize_nfc = false
//! collapse_elongation = true
//! case_marked_rules = true
//! memo_capacity = 4096
//!
//! [data]
//! lexicon_files = ["extra.tsv"]
//! passthrough_files = ["brands.txt"]
//! rule_files = []
//! pack = "colloquial"
//! pack_dir = "/opt/singlish/packs"
//! ```
//!
//! Relative paths in `[data]` are resolved against the config file's
//! directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Error, Result};
use crate::pack::EngineData;
use crate::session::{LiveSession, DEFAULT_MEMO_CAPACITY};
use crate::transliterator::{EngineOptions, Transliterator};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub engine: EngineConfig,
    pub data: DataConfig,
}

/// `[engine]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub normalize_nfc: bool,
    pub collapse_elongation: bool,
    pub case_marked_rules: bool,
    pub memo_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let options = EngineOptions::default();
        EngineConfig {
            normalize_nfc: options.normalize_nfc,
            collapse_elongation: options.collapse_elongation,
            case_marked_rules: options.case_marked_rules,
            memo_capacity: DEFAULT_MEMO_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn options(&self) -> EngineOptions {
        EngineOptions {
            normalize_nfc: self.normalize_nfc,
            collapse_elongation: self.collapse_elongation,
            case_marked_rules: self.case_marked_rules,
        }
    }
}

/// `[data]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    pub lexicon_files: Vec<PathBuf>,
    pub passthrough_files: Vec<PathBuf>,
    pub rule_files: Vec<PathBuf>,
    pub pack: Option<String>,
    pub pack_dir: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Config::from_toml_str(&content)?;
        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Make relative data paths relative to `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        let data = &mut self.data;
        data.lexicon_files.iter_mut().for_each(resolve);
        data.passthrough_files.iter_mut().for_each(resolve);
        data.rule_files.iter_mut().for_each(resolve);
        data.pack_dir.iter_mut().for_each(resolve);
    }

    /// Load the configured data on top of the built-in tables
    pub fn load_data(&self) -> Result<EngineData> {
        let mut data = EngineData::builtin();
        for path in &self.data.rule_files {
            data.load_rule_file(path)?;
        }
        for path in &self.data.lexicon_files {
            data.load_lexicon_file(path)?;
        }
        for path in &self.data.passthrough_files {
            data.load_passthrough_file(path)?;
        }
        if let Some(ref pack) = self.data.pack {
            data.load_pack(pack, self.data.pack_dir.as_deref())?;
        }
        Ok(data)
    }

    /// Build a transliterator from this configuration
    pub fn build_transliterator(&self) -> Result<Transliterator> {
        Ok(self.load_data()?.build(self.engine.options()))
    }

    /// Build a live session from this configuration
    pub fn build_session(&self) -> Result<LiveSession> {
        Ok(LiveSession::with_capacity(
            self.build_transliterator()?,
            self.engine.memo_capacity,
        ))
    }
}
