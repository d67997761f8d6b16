//! The query surface of the concordance.
//!
//! [`QueryEngine`] owns a built [`DocumentIndex`] together with the stop-word
//! set and tokenizer used on query input. All query methods take `&self`, so
//! a single engine can be shared across threads once built.
//!
//! Input handling follows two rules. Malformed arguments (an empty word,
//! phrase, prefix or title, or an empty word list) are rejected with
//! [`ConcordanceError::InvalidArgument`] before any work is done. Words that
//! were never indexed and titles that name no section are not errors: they
//! simply contribute nothing, so an absent word empties an AND and leaves an
//! OR unchanged.
//!
//! # Examples
//!
//! ```
//! use concordance::analysis::stop::StopWords;
//! use concordance::engine::QueryEngine;
//! use concordance::index::posting::Posting;
//! use concordance::index::section::SectionTable;
//!
//! let lines = vec![
//!     "to be, or not to be".to_string(),
//!     "that is the question".to_string(),
//! ];
//! let engine = QueryEngine::build(lines, SectionTable::empty(), StopWords::english()).unwrap();
//!
//! assert_eq!(engine.word_count("Be"), 2);
//! assert_eq!(engine.phrase_occurrence("not to be").unwrap(), vec![Posting::new(1, 11)]);
//! assert_eq!(engine.words_on_line(&["question"]).unwrap(), vec![2]);
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::stop::StopWords;
use crate::analysis::tokenizer::{LineTokenizer, Tokenizer};
use crate::config::EngineConfig;
use crate::error::{ConcordanceError, Result};
use crate::index::indexer::{DocumentIndex, Indexer};
use crate::index::posting::{Posting, SectionId};
use crate::index::section::SectionTable;
use crate::loader;
use crate::query::phrase::PhraseMatcher;
use crate::query::section::{SectionQuery, SectionSearcher, WordHit};
use crate::query::set_ops::{difference, intersect, line_numbers, union};

/// A read-only concordance over one document.
pub struct QueryEngine {
    index: DocumentIndex,
    stop_words: StopWords,
    tokenizer: Arc<dyn Tokenizer>,
}

impl fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryEngine")
            .field("lines", &self.index.lines().len())
            .field("words", &self.index.trie().word_count())
            .field("sections", &self.index.sections().len())
            .field("stop_words", &self.stop_words.len())
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

impl QueryEngine {
    /// Wrap an index built with the default [`LineTokenizer`].
    pub fn new(index: DocumentIndex, stop_words: StopWords) -> Self {
        QueryEngine {
            index,
            stop_words,
            tokenizer: Arc::new(LineTokenizer::new()),
        }
    }

    /// Index lowercased `lines` and wrap the result.
    pub fn build(lines: Vec<String>, sections: SectionTable, stop_words: StopWords) -> Result<Self> {
        Self::build_with(&Indexer::default(), lines, sections, stop_words)
    }

    /// Index with a specific [`Indexer`]; its tokenizer also splits query
    /// words.
    pub fn build_with(
        indexer: &Indexer,
        lines: Vec<String>,
        sections: SectionTable,
        stop_words: StopWords,
    ) -> Result<Self> {
        let index = indexer.build(lines, sections)?;
        Ok(QueryEngine {
            index,
            stop_words,
            tokenizer: Arc::clone(indexer.tokenizer()),
        })
    }

    /// Load the files named by `config` and index them.
    pub fn open(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let lines = loader::load_document(&config.document)?;
        let sections = match config.section_index_path() {
            Some(path) => loader::load_sections(path)?,
            None => SectionTable::empty(),
        };
        let stop_words = match config.stop_words_path() {
            Some(path) => loader::load_stop_words(path)?,
            None if config.english_stop_words => StopWords::english(),
            None => StopWords::new(),
        };

        Self::build(lines, sections, stop_words)
    }

    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Number of times `word` occurs in the document.
    ///
    /// `word` is tokenized like the document, so case and surrounding
    /// punctuation are ignored. Input that is not exactly one word counts 0.
    pub fn word_count(&self, word: &str) -> usize {
        match self.tokenizer.words(word).ok().as_deref() {
            Some([word]) => self.index.trie().occurrences(word).len(),
            _ => 0,
        }
    }

    /// Start positions of `phrase`, in document order.
    ///
    /// Punctuation is skipped on both sides of the comparison and whitespace
    /// runs count as one space. The match may span line breaks.
    pub fn phrase_occurrence(&self, phrase: &str) -> Result<Vec<Posting>> {
        if phrase.trim().is_empty() {
            return Err(ConcordanceError::invalid_argument("phrase is empty"));
        }

        let postings = PhraseMatcher::new(&self.index).find(phrase);
        debug!("phrase '{}' matched {} occurrences", phrase.trim(), postings.len());
        Ok(postings)
    }

    /// Positions of every word starting with `prefix`, sorted by line then
    /// column.
    pub fn prefix_occurrence(&self, prefix: &str) -> Result<Vec<Posting>> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(ConcordanceError::invalid_argument("prefix is empty"));
        }

        let mut postings = self.index.trie().occurrences_for_subtree(&prefix);
        postings.sort_unstable();
        debug!("prefix '{prefix}' matched {} occurrences", postings.len());
        Ok(postings)
    }

    /// Lines containing every one of `words`.
    pub fn words_on_line<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<u32>> {
        let words = self.query_words(words, "words", false)?;
        Ok(intersect(&self.line_lists(&words)))
    }

    /// Lines containing at least one of `words`.
    pub fn some_words_on_line<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<u32>> {
        let words = self.query_words(words, "words", false)?;
        Ok(union(&self.line_lists(&words)))
    }

    /// Lines containing every `required` word and none of the `excluded`
    /// words.
    pub fn words_not_on_line<S: AsRef<str>, T: AsRef<str>>(
        &self,
        required: &[S],
        excluded: &[T],
    ) -> Result<Vec<u32>> {
        let required = self.query_words(required, "required words", false)?;
        let excluded = self.query_words(excluded, "excluded words", false)?;

        let lines = intersect(&self.line_lists(&required));
        Ok(difference(&lines, &self.line_lists(&excluded)))
    }

    /// Occurrences of `words` in the sections titled `titles` that contain
    /// every word. An empty `titles` searches the whole document.
    pub fn simple_and_search<T: AsRef<str>, S: AsRef<str>>(
        &self,
        titles: &[T],
        words: &[S],
    ) -> Result<Vec<WordHit>> {
        let words = self.query_words(words, "words", false)?;
        self.section_search(titles, SectionQuery::And { words: &words })
    }

    /// Occurrences of `words` in the sections titled `titles` that contain
    /// any of them.
    pub fn simple_or_search<T: AsRef<str>, S: AsRef<str>>(
        &self,
        titles: &[T],
        words: &[S],
    ) -> Result<Vec<WordHit>> {
        let words = self.query_words(words, "words", false)?;
        self.section_search(titles, SectionQuery::Or { words: &words })
    }

    /// Occurrences of `required` in the sections titled `titles` that contain
    /// every required word and no excluded word.
    pub fn simple_not_search<T: AsRef<str>, S: AsRef<str>, U: AsRef<str>>(
        &self,
        titles: &[T],
        required: &[S],
        excluded: &[U],
    ) -> Result<Vec<WordHit>> {
        let required = self.query_words(required, "required words", false)?;
        let excluded = self.query_words(excluded, "excluded words", true)?;
        self.section_search(
            titles,
            SectionQuery::Not {
                required: &required,
                excluded: &excluded,
            },
        )
    }

    /// Occurrences of `required` and `or_words` in the sections titled
    /// `titles` that contain every required word and at least one or-word.
    pub fn compound_and_or_search<T: AsRef<str>, S: AsRef<str>, U: AsRef<str>>(
        &self,
        titles: &[T],
        required: &[S],
        or_words: &[U],
    ) -> Result<Vec<WordHit>> {
        let required = self.query_words(required, "required words", false)?;
        let or_words = self.query_words(or_words, "or words", true)?;
        self.section_search(
            titles,
            SectionQuery::AndOr {
                required: &required,
                or_words: &or_words,
            },
        )
    }

    fn section_search<T: AsRef<str>>(
        &self,
        titles: &[T],
        query: SectionQuery<'_>,
    ) -> Result<Vec<WordHit>> {
        let Some(targets) = self.targets(titles)? else {
            return Ok(Vec::new());
        };

        let hits = SectionSearcher::new(&self.index).search(&targets, query);
        debug!("{query:?} over {} sections: {} hits", targets.len(), hits.len());
        Ok(hits)
    }

    /// Section ids for `titles`, or `None` if some title names no section.
    ///
    /// No titles means every section plus the lines before the first one.
    fn targets<T: AsRef<str>>(&self, titles: &[T]) -> Result<Option<Vec<Option<SectionId>>>> {
        let sections = self.index.sections();
        if titles.is_empty() {
            let all = std::iter::once(None)
                .chain(sections.iter().map(|s| Some(s.id)))
                .collect();
            return Ok(Some(all));
        }

        let mut targets = Vec::with_capacity(titles.len());
        for title in titles {
            let title = title.as_ref();
            if title.trim().is_empty() {
                return Err(ConcordanceError::invalid_argument("section title is empty"));
            }
            match sections.resolve(title) {
                Some(section) => targets.push(Some(section.id)),
                None => {
                    debug!("unknown section '{}'", title.trim());
                    return Ok(None);
                }
            }
        }

        targets.sort_unstable();
        targets.dedup();
        Ok(Some(targets))
    }

    /// Validate and normalise a word list, then drop stop words.
    ///
    /// Each element is tokenized like the document and must yield at least one
    /// word; an element such as `to-morrow` yields two. The list itself may
    /// only be empty when `allow_empty` is set.
    fn query_words<S: AsRef<str>>(
        &self,
        words: &[S],
        what: &str,
        allow_empty: bool,
    ) -> Result<Vec<String>> {
        if words.is_empty() && !allow_empty {
            return Err(ConcordanceError::invalid_argument(format!(
                "{what}: list is empty"
            )));
        }

        let mut normalized = Vec::with_capacity(words.len());
        for word in words {
            let tokens = self.tokenizer.words(word.as_ref())?;
            if tokens.is_empty() {
                return Err(ConcordanceError::invalid_argument(format!(
                    "{what}: '{}' contains no word",
                    word.as_ref().trim()
                )));
            }
            normalized.extend(
                tokens
                    .into_iter()
                    .filter(|token| !self.stop_words.contains(token)),
            );
        }
        Ok(normalized)
    }

    fn line_lists(&self, words: &[String]) -> Vec<Vec<u32>> {
        words
            .iter()
            .map(|word| line_numbers(self.index.trie().occurrences(word)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "the sonnets\n\
                        from fairest creatures we desire increase\n\
                        that thereby beauty's rose might never die\n\
                        hamlet\n\
                        to be, or not to be, that is the question\n\
                        whether 'tis nobler in the mind to\n\
                        suffer the slings and arrows of outrageous fortune\n\
                        macbeth\n\
                        fair is foul, and foul is fair";

    fn engine() -> QueryEngine {
        let lines = TEXT.lines().map(|l| l.trim().to_lowercase()).collect();
        let sections =
            SectionTable::new(vec![("The Sonnets", 1), ("Hamlet", 4), ("Macbeth", 8)]).unwrap();
        QueryEngine::build(lines, sections, StopWords::english()).unwrap()
    }

    #[test]
    fn test_word_count() {
        let engine = engine();
        assert_eq!(engine.word_count("to"), 3);
        assert_eq!(engine.word_count("FOUL"), 2);
        assert_eq!(engine.word_count("missing"), 0);
        assert_eq!(engine.word_count(""), 0);
        assert_eq!(engine.word_count("   "), 0);
    }

    #[test]
    fn test_word_count_tokenizes_input() {
        let engine = engine();
        assert_eq!(engine.word_count("'Tis"), 1);
        assert_eq!(engine.word_count("rose,"), 1);
        assert_eq!(engine.word_count("beauty's"), 1);
        assert_eq!(engine.word_count("fair foul"), 0);
        assert_eq!(engine.word_count("?!"), 0);
    }

    #[test]
    fn test_word_count_includes_stop_words() {
        assert_eq!(engine().word_count("the"), 4);
    }

    #[test]
    fn test_phrase_occurrence() {
        let engine = engine();
        assert_eq!(
            engine.phrase_occurrence("To be").unwrap(),
            vec![Posting::new(5, 1), Posting::new(5, 15)]
        );
        assert_eq!(
            engine.phrase_occurrence("mind to suffer").unwrap(),
            vec![Posting::new(6, 28)]
        );
        assert_eq!(
            engine.phrase_occurrence("  foul,  and   FOUL ").unwrap(),
            vec![Posting::new(9, 9)]
        );
        assert!(engine.phrase_occurrence("fair is fair").unwrap().is_empty());
    }

    #[test]
    fn test_phrase_occurrence_rejects_empty() {
        let engine = engine();
        assert!(engine.phrase_occurrence("").unwrap_err().is_invalid_argument());
        assert!(engine.phrase_occurrence("  ").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_prefix_occurrence_sorted() {
        let engine = engine();
        assert_eq!(
            engine.prefix_occurrence("fa").unwrap(),
            vec![Posting::new(2, 6), Posting::new(9, 1), Posting::new(9, 27)]
        );
        assert_eq!(
            engine.prefix_occurrence("Th").unwrap().first(),
            Some(&Posting::new(1, 1))
        );
        assert!(engine.prefix_occurrence("zz").unwrap().is_empty());
        assert!(engine.prefix_occurrence("").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_words_on_line() {
        let engine = engine();
        assert_eq!(engine.words_on_line(&["fair", "foul"]).unwrap(), vec![9]);
        assert_eq!(engine.words_on_line(&["Rose", "die"]).unwrap(), vec![3]);
        assert!(engine.words_on_line(&["rose", "missing"]).unwrap().is_empty());
    }

    #[test]
    fn test_some_words_on_line() {
        let engine = engine();
        assert_eq!(
            engine.some_words_on_line(&["fair", "rose", "missing"]).unwrap(),
            vec![3, 9]
        );
    }

    #[test]
    fn test_words_not_on_line() {
        let engine = engine();
        assert_eq!(
            engine.words_not_on_line(&["mind"], &["question"]).unwrap(),
            vec![6]
        );
        assert!(
            engine
                .words_not_on_line(&["fair"], &["foul"])
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            engine.words_not_on_line(&["fair"], &["missing"]).unwrap(),
            vec![9]
        );
    }

    #[test]
    fn test_query_words_are_tokenized() {
        let engine = engine();
        assert_eq!(engine.words_on_line(&["Rose,", "'tis"]).unwrap(), Vec::<u32>::new());
        assert_eq!(engine.words_on_line(&["rose,"]).unwrap(), vec![3]);
        assert_eq!(engine.some_words_on_line(&["'tis", "(fortune)"]).unwrap(), vec![6, 7]);
        assert_eq!(engine.words_on_line(&["fair-foul"]).unwrap(), vec![9]);
        assert!(
            engine
                .some_words_on_line(&["rose", "--"])
                .unwrap_err()
                .is_invalid_argument()
        );
        assert_eq!(
            engine.simple_and_search(&["hamlet"], &["Mind."]).unwrap(),
            vec![WordHit::new(6, 28, "mind")]
        );
    }

    #[test]
    fn test_line_queries_ignore_stop_words() {
        let engine = engine();
        // "the" is a stop word, so only "mind" constrains the result.
        assert_eq!(engine.words_on_line(&["mind", "the"]).unwrap(), vec![6]);
    }

    #[test]
    fn test_line_query_validation() {
        let engine = engine();
        let empty: [&str; 0] = [];
        assert!(engine.words_on_line(&empty).unwrap_err().is_invalid_argument());
        assert!(engine.words_on_line(&["rose", ""]).unwrap_err().is_invalid_argument());
        assert!(engine.some_words_on_line(&[" "]).unwrap_err().is_invalid_argument());
        assert!(
            engine
                .words_not_on_line(&["rose"], &empty)
                .unwrap_err()
                .is_invalid_argument()
        );
        assert!(
            engine
                .words_not_on_line(&empty, &["rose"])
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn test_simple_and_search() {
        let engine = engine();
        assert_eq!(
            engine
                .simple_and_search(&["macbeth"], &["fair", "foul"])
                .unwrap(),
            vec![
                WordHit::new(9, 1, "fair"),
                WordHit::new(9, 9, "foul"),
                WordHit::new(9, 19, "foul"),
                WordHit::new(9, 27, "fair"),
            ]
        );
        assert!(
            engine
                .simple_and_search(&["hamlet"], &["fair", "foul"])
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_empty_titles_search_everything() {
        let engine = engine();
        let titles: [&str; 0] = [];
        assert_eq!(
            engine.simple_or_search(&titles, &["rose", "mind"]).unwrap(),
            vec![WordHit::new(3, 23, "rose"), WordHit::new(6, 28, "mind")]
        );
    }

    #[test]
    fn test_unknown_title_is_empty_not_error() {
        let engine = engine();
        assert!(
            engine
                .simple_or_search(&["hamlet", "king lear"], &["mind"])
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_simple_not_search() {
        let engine = engine();
        let titles: [&str; 0] = [];
        let no_words: [&str; 0] = [];
        assert_eq!(
            engine
                .simple_not_search(&titles, &["fortune"], &["rose"])
                .unwrap(),
            vec![WordHit::new(7, 44, "fortune")]
        );
        assert!(
            engine
                .simple_not_search(&titles, &["fortune"], &["question"])
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            engine
                .simple_not_search(&["HAMLET"], &["fortune"], &no_words)
                .unwrap(),
            vec![WordHit::new(7, 44, "fortune")]
        );
    }

    #[test]
    fn test_compound_and_or_search() {
        let engine = engine();
        assert_eq!(
            engine
                .compound_and_or_search(&["hamlet", "macbeth"], &["question"], &["mind", "fair"])
                .unwrap(),
            vec![WordHit::new(5, 34, "question"), WordHit::new(6, 28, "mind")]
        );
    }

    #[test]
    fn test_section_query_validation() {
        let engine = engine();
        assert!(
            engine
                .simple_and_search(&[""], &["rose"])
                .unwrap_err()
                .is_invalid_argument()
        );
        assert!(
            engine
                .compound_and_or_search(&["hamlet"], &["mind"], &[""])
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn test_open_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("doc.txt");
        let index = dir.path().join("doc.index");
        std::fs::write(&document, "Preface\nOne\nrose\nTwo\nrose garden").unwrap();
        std::fs::write(&index, "one,2\ntwo,4\n").unwrap();

        let config = EngineConfig::new(&document).with_section_index(&index);
        let engine = QueryEngine::open(&config).unwrap();

        assert_eq!(engine.index().sections().len(), 2);
        assert_eq!(engine.word_count("rose"), 2);
        assert_eq!(
            engine.simple_and_search(&["two"], &["rose"]).unwrap(),
            vec![WordHit::new(5, 1, "rose")]
        );
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QueryEngine>();
    }
}
