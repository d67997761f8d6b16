//! Engine configuration.
//!
//! An [`EngineConfig`] names the input files a
//! [`QueryEngine`](crate::engine::QueryEngine) is built from. It can be
//! assembled in code or read from a JSON file:
//!
//! ```json
//! {
//!   "document": "shakespeare.txt",
//!   "section_index": "shakespeare.index.txt",
//!   "stop_words": "stopwords.txt"
//! }
//! ```
//!
//! Relative paths in a JSON file are resolved against the directory holding
//! that file.
//!
//! # Examples
//!
//! ```
//! use concordance::config::EngineConfig;
//!
//! let config = EngineConfig::new("shakespeare.txt")
//!     .with_section_index("shakespeare.index.txt")
//!     .with_english_stop_words(true);
//! assert!(config.validate().is_ok());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConcordanceError, Result};

/// Paths and switches used to build a query engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The document to index.
    pub document: PathBuf,

    /// `title,start_line` file. Without it the document has no sections.
    #[serde(default)]
    pub section_index: Option<PathBuf>,

    /// One stop word per line.
    #[serde(default)]
    pub stop_words: Option<PathBuf>,

    /// Use the built-in English list when `stop_words` is not set.
    #[serde(default)]
    pub english_stop_words: bool,
}

impl EngineConfig {
    pub fn new<P: Into<PathBuf>>(document: P) -> Self {
        EngineConfig {
            document: document.into(),
            section_index: None,
            stop_words: None,
            english_stop_words: false,
        }
    }

    pub fn with_section_index<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.section_index = Some(path.into());
        self
    }

    pub fn with_stop_words<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.stop_words = Some(path.into());
        self
    }

    pub fn with_english_stop_words(mut self, enabled: bool) -> Self {
        self.english_stop_words = enabled;
        self
    }

    /// Read a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&text)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_against(base))
    }

    /// Make relative paths relative to `base`.
    pub fn resolve_against(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| {
            if p.as_os_str().is_empty() || p.is_absolute() {
                p
            } else {
                base.join(p)
            }
        };

        self.document = resolve(self.document);
        self.section_index = self.section_index.map(resolve);
        self.stop_words = self.stop_words.map(resolve);
        self
    }

    /// Check the configuration before any file is opened.
    pub fn validate(&self) -> Result<()> {
        if self.document.as_os_str().is_empty() {
            return Err(ConcordanceError::invalid_argument(
                "no document path configured",
            ));
        }
        Ok(())
    }

    /// The section index path, treating an empty path as unset.
    pub fn section_index_path(&self) -> Option<&Path> {
        non_empty(self.section_index.as_deref())
    }

    /// The stop-word path, treating an empty path as unset.
    pub fn stop_words_path(&self) -> Option<&Path> {
        non_empty(self.stop_words.as_deref())
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
