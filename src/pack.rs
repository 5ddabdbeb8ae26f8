//! Lexicon packs and engine data loading.
//!
//! A pack is a directory of extra data layered over the built-in tables:
//!
//! ```text
//! <base>/<name>/
//!     lexicon/**/*.tsv        extra lexicon entries
//!     passthrough/**/*.txt    extra allow-list words
//!     rules.tsv               added or overridden romanization rules
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::lexicon::{Lexicon, LexiconBuilder};
use crate::passthrough::PassthroughList;
use crate::rules::RuleTable;
use crate::transliterator::{EngineOptions, Transliterator};

/// Default pack name
pub const DEFAULT_PACK: &str = "general";

const LEXICON_DIR: &str = "lexicon";
const PASSTHROUGH_DIR: &str = "passthrough";
const RULES_FILE: &str = "rules.tsv";

/// Get the default base path for packs
/// Returns `<data dir>/singlish-rs/packs/`
pub fn default_base_path() -> PathBuf {
    #[cfg(feature = "packs")]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("singlish-rs")
            .join("packs")
    }
    #[cfg(not(feature = "packs"))]
    {
        PathBuf::from("packs")
    }
}

/// Get the path to a specific pack
pub fn pack_path(name: &str, base_path: Option<&Path>) -> PathBuf {
    let base = base_path.map(PathBuf::from).unwrap_or_else(default_base_path);
    base.join(name)
}

/// Check if a pack exists locally
pub fn pack_exists(name: &str, base_path: Option<&Path>) -> bool {
    pack_path(name, base_path).is_dir()
}

/// List all TSV files in a pack's lexicon directory
pub fn list_lexicon_files(pack_path: &Path) -> Result<Vec<PathBuf>> {
    list_files(&pack_path.join(LEXICON_DIR), "tsv")
}

/// List all text files in a pack's passthrough directory
pub fn list_passthrough_files(pack_path: &Path) -> Result<Vec<PathBuf>> {
    list_files(&pack_path.join(PASSTHROUGH_DIR), "txt")
}

fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if dir.is_dir() {
        collect_files(dir, extension, &mut files).map_err(|e| Error::io(dir, e))?;
    }
    // Later files override earlier ones, so keep the order stable
    files.sort();
    Ok(files)
}

fn collect_files(dir: &Path, extension: &str, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, extension, files)?;
        } else if path.extension().map_or(false, |ext| ext == extension) {
            files.push(path);
        }
    }
    Ok(())
}

/// Counts of what a pack contributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackSummary {
    pub lexicon_entries: usize,
    pub passthrough_words: usize,
    pub rules: usize,
}

/// Mutable engine data: built-in tables plus any loaded files and packs
#[derive(Debug, Default)]
pub struct EngineData {
    rules: RuleTable,
    lexicon: LexiconBuilder,
    passthrough: PassthroughList,
}

impl EngineData {
    /// Start from empty tables
    pub fn empty() -> Self {
        EngineData::default()
    }

    /// Start from the built-in tables
    pub fn builtin() -> Self {
        EngineData {
            rules: RuleTable::builtin(),
            lexicon: LexiconBuilder::from_lexicon(Lexicon::builtin()),
            passthrough: PassthroughList::builtin(),
        }
    }

    /// Load an extra lexicon TSV file
    pub fn load_lexicon_file(&mut self, path: &Path) -> Result<usize> {
        self.lexicon.load_file(path)
    }

    /// Load an extra allow-list file
    pub fn load_passthrough_file(&mut self, path: &Path) -> Result<usize> {
        self.passthrough.load_file(path)
    }

    /// Load an extra rule TSV file
    pub fn load_rule_file(&mut self, path: &Path) -> Result<usize> {
        self.rules.load_file(path)
    }

    /// Load every file of the pack at `path`
    pub fn load_pack_dir(&mut self, path: &Path) -> Result<PackSummary> {
        if !path.is_dir() {
            return Err(Error::PackNotFound(path.display().to_string()));
        }

        let mut summary = PackSummary::default();
        for file in list_lexicon_files(path)? {
            summary.lexicon_entries += self.load_lexicon_file(&file)?;
        }
        for file in list_passthrough_files(path)? {
            summary.passthrough_words += self.load_passthrough_file(&file)?;
        }
        let rules = path.join(RULES_FILE);
        if rules.is_file() {
            summary.rules = self.load_rule_file(&rules)?;
        }

        info!(
            pack = %path.display(),
            lexicon = summary.lexicon_entries,
            passthrough = summary.passthrough_words,
            rules = summary.rules,
            "loaded lexicon pack"
        );
        Ok(summary)
    }

    /// Load a named pack from `base_path` (or the default base)
    pub fn load_pack(&mut self, name: &str, base_path: Option<&Path>) -> Result<PackSummary> {
        let path = pack_path(name, base_path);
        debug!(pack = name, path = %path.display(), "looking up lexicon pack");
        if !path.is_dir() {
            return Err(Error::PackNotFound(name.to_string()));
        }
        self.load_pack_dir(&path)
    }

    /// Build a transliterator from the loaded data
    pub fn build(self, options: EngineOptions) -> Transliterator {
        Transliterator::with_data(self.rules, self.lexicon.build(), self.passthrough)
            .with_options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_pack(base: &Path) -> PathBuf {
        let pack = base.join("colloquial");
        fs::create_dir_all(pack.join("lexicon/slang")).unwrap();
        fs::create_dir_all(pack.join("passthrough")).unwrap();
        fs::write(pack.join("lexicon/slang/words.tsv"), "machan\tමචං\tNOUN\t900\n").unwrap();
        fs::write(pack.join("lexicon/README.md"), "not a lexicon").unwrap();
        fs::write(pack.join("passthrough/brands.txt"), "keells\narpico\n").unwrap();
        fs::write(pack.join("rules.tsv"), "q\tconsonant\tක\n").unwrap();
        pack
    }

    #[test]
    fn test_pack_path() {
        let path = pack_path("general", Some(Path::new("/tmp/packs")));
        assert_eq!(path, PathBuf::from("/tmp/packs/general"));
    }

    #[cfg(feature = "packs")]
    #[test]
    fn test_default_base_path() {
        let path = default_base_path();
        assert!(path.ends_with("singlish-rs/packs"));
    }

    #[test]
    fn test_list_files() {
        let dir = TempDir::new().unwrap();
        let pack = make_pack(dir.path());
        assert!(pack_exists("colloquial", Some(dir.path())));
        assert!(!pack_exists("missing", Some(dir.path())));

        let lexicon = list_lexicon_files(&pack).unwrap();
        assert_eq!(lexicon.len(), 1);
        assert!(lexicon[0].ends_with("words.tsv"));
        assert_eq!(list_passthrough_files(&pack).unwrap().len(), 1);
    }

    #[test]
    fn test_load_pack() {
        let dir = TempDir::new().unwrap();
        make_pack(dir.path());

        let mut data = EngineData::builtin();
        let summary = data.load_pack("colloquial", Some(dir.path())).unwrap();
        assert_eq!(
            summary,
            PackSummary {
                lexicon_entries: 1,
                passthrough_words: 2,
                rules: 1,
            }
        );

        let engine = data.build(EngineOptions::default());
        assert_eq!(engine.convert("machan Keells qa"), "මචං Keells ක");
    }

    #[test]
    fn test_missing_pack() {
        let dir = TempDir::new().unwrap();
        let mut data = EngineData::builtin();
        let err = data.load_pack("nope", Some(dir.path())).unwrap_err();
        assert!(matches!(err, Error::PackNotFound(name) if name == "nope"));
    }
}
