//! # Concordance
//!
//! An in-memory concordance over a single text document.
//!
//! ## Features
//!
//! - Character trie of every word with `(line, column)` postings
//! - Word counts, phrase lookups across line breaks and prefix expansion
//! - AND, OR and NOT over the lines a word appears on
//! - Boolean search scoped to named sections of the document
//! - Stop-word filtering for boolean queries
//!
//! ## Example
//!
//! ```
//! use concordance::prelude::*;
//!
//! let lines: Vec<String> = [
//!     "the sonnets",
//!     "shall i compare thee",
//!     "hamlet",
//!     "to be or not to be that is the question",
//! ]
//! .iter()
//! .map(|l| l.to_string())
//! .collect();
//! let sections = SectionTable::new(vec![("The Sonnets", 1), ("Hamlet", 3)]).unwrap();
//! let engine = QueryEngine::build(lines, sections, StopWords::english()).unwrap();
//!
//! assert_eq!(engine.word_count("be"), 2);
//! assert_eq!(engine.some_words_on_line(&["thee", "question"]).unwrap(), vec![2, 4]);
//! assert_eq!(
//!     engine.simple_and_search(&["hamlet"], &["question"]).unwrap(),
//!     vec![WordHit::new(4, 32, "question")]
//! );
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod loader;
pub mod query;

pub mod prelude {
    pub use crate::analysis::stop::StopWords;
    pub use crate::analysis::tokenizer::{LineTokenizer, Tokenizer};
    pub use crate::config::EngineConfig;
    pub use crate::engine::QueryEngine;
    pub use crate::error::{ConcordanceError, Result};
    pub use crate::index::posting::Posting;
    pub use crate::index::section::SectionTable;
    pub use crate::query::WordHit;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
