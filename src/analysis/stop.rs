//! Stop words.
//!
//! Stop words are dropped from the word lists of boolean line and section
//! queries. They are still indexed, so `word_count`, phrase and prefix lookups
//! see them like any other word.
//!
//! # Examples
//!
//! ```
//! use concordance::analysis::stop::StopWords;
//!
//! let stop_words = StopWords::from_words(vec!["The", "and"]);
//! assert!(stop_words.contains("the"));
//! assert!(!stop_words.contains("thee"));
//! ```

use std::sync::LazyLock;

use ahash::AHashSet;

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<AHashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// An immutable set of lowercased stop words.
#[derive(Clone, Debug, Default)]
pub struct StopWords {
    words: AHashSet<String>,
}

impl StopWords {
    /// An empty set: no word is a stop word.
    pub fn new() -> Self {
        StopWords::default()
    }

    /// The built-in English list.
    pub fn english() -> Self {
        StopWords {
            words: DEFAULT_ENGLISH_STOP_WORDS_SET.clone(),
        }
    }

    /// Build a set from arbitrary words. Words are trimmed and lowercased and
    /// blanks are ignored.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        StopWords { words }
    }

    /// Check whether `word` (already lowercased) is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
