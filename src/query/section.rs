//! Section-scoped boolean search.
//!
//! Membership is decided per section from each word's section set, so no
//! postings are merged. Only once a section qualifies are the matching word
//! occurrences inside it collected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::index::indexer::DocumentIndex;
use crate::index::posting::{PostingsList, SectionId};

/// One reported occurrence: where, and which word.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordHit {
    pub line: u32,
    pub column: u32,
    pub word: String,
}

impl WordHit {
    pub fn new<S: Into<String>>(line: u32, column: u32, word: S) -> Self {
        WordHit {
            line,
            column,
            word: word.into(),
        }
    }
}

impl fmt::Display for WordHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.line, self.column, self.word)
    }
}

/// The boolean shape of a section query. Words are lowercased and free of
/// stop words.
#[derive(Debug, Clone, Copy)]
pub enum SectionQuery<'q> {
    /// Sections containing every word.
    And { words: &'q [String] },
    /// Sections containing any word.
    Or { words: &'q [String] },
    /// Sections containing every required word and no excluded word.
    Not {
        required: &'q [String],
        excluded: &'q [String],
    },
    /// Sections containing every required word and at least one or-word.
    AndOr {
        required: &'q [String],
        or_words: &'q [String],
    },
}

/// A query word together with its postings, if it was ever indexed.
struct Term<'a> {
    word: &'a str,
    postings: Option<&'a PostingsList>,
}

impl Term<'_> {
    fn in_section(&self, section: Option<SectionId>) -> bool {
        self.postings.is_some_and(|p| p.in_section(section))
    }
}

/// Runs [`SectionQuery`]s against a [`DocumentIndex`].
#[derive(Debug, Clone, Copy)]
pub struct SectionSearcher<'a> {
    index: &'a DocumentIndex,
}

impl<'a> SectionSearcher<'a> {
    pub fn new(index: &'a DocumentIndex) -> Self {
        SectionSearcher { index }
    }

    /// Evaluate `query` in each of `targets` (`None` is the text before the
    /// first section).
    ///
    /// The result is sorted by line, column and word, without duplicates.
    pub fn search(&self, targets: &[Option<SectionId>], query: SectionQuery<'_>) -> Vec<WordHit> {
        let mut hits = Vec::new();

        match query {
            SectionQuery::And { words } => {
                let terms = self.terms(words);
                for &section in targets {
                    if terms.iter().all(|t| t.in_section(section)) {
                        Self::collect(&terms, section, &mut hits);
                    }
                }
            }
            SectionQuery::Or { words } => {
                let terms = self.terms(words);
                for &section in targets {
                    Self::collect(&terms, section, &mut hits);
                }
            }
            SectionQuery::Not { required, excluded } => {
                let required = self.terms(required);
                let excluded = self.terms(excluded);
                for &section in targets {
                    if required.iter().all(|t| t.in_section(section))
                        && !excluded.iter().any(|t| t.in_section(section))
                    {
                        Self::collect(&required, section, &mut hits);
                    }
                }
            }
            SectionQuery::AndOr { required, or_words } => {
                let required = self.terms(required);
                let or_terms = self.terms(or_words);
                for &section in targets {
                    if required.iter().all(|t| t.in_section(section))
                        && or_terms.iter().any(|t| t.in_section(section))
                    {
                        Self::collect(&required, section, &mut hits);
                        Self::collect(&or_terms, section, &mut hits);
                    }
                }
            }
        }

        hits.sort();
        hits.dedup();
        hits
    }

    fn terms<'w>(&self, words: &'w [String]) -> Vec<Term<'w>>
    where
        'a: 'w,
    {
        words
            .iter()
            .map(|word| Term {
                word,
                postings: self.index.trie().postings(word),
            })
            .collect()
    }

    /// Push every occurrence of `terms` inside `section`. Terms absent from
    /// the section contribute nothing.
    fn collect(terms: &[Term<'_>], section: Option<SectionId>, hits: &mut Vec<WordHit>) {
        for term in terms {
            let Some(postings) = term.postings else {
                continue;
            };
            hits.extend(
                postings
                    .postings_in_section(section)
                    .iter()
                    .map(|p| WordHit::new(p.line, p.column, term.word)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::indexer::Indexer;
    use crate::index::section::SectionTable;

    // Section 0 starts on line 2, section 1 on line 4, section 2 on line 6.
    const TEXT: &str = "a preface about love\n\
                        love and war\n\
                        more war\n\
                        love and peace\n\
                        sweet peace\n\
                        war and peace and love";

    fn index() -> DocumentIndex {
        let lines = TEXT.lines().map(|l| l.trim().to_lowercase()).collect();
        let sections = SectionTable::new(vec![("one", 2), ("two", 4), ("three", 6)]).unwrap();
        Indexer::default().build(lines, sections).unwrap()
    }

    fn words(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    const ALL: [Option<SectionId>; 4] = [None, Some(0), Some(1), Some(2)];

    #[test]
    fn test_and() {
        let index = index();
        let query_words = words(&["love", "war"]);
        let hits = SectionSearcher::new(&index).search(
            &ALL,
            SectionQuery::And {
                words: &query_words,
            },
        );
        assert_eq!(
            hits,
            vec![
                WordHit::new(2, 1, "love"),
                WordHit::new(2, 10, "war"),
                WordHit::new(3, 6, "war"),
                WordHit::new(6, 1, "war"),
                WordHit::new(6, 19, "love"),
            ]
        );
    }

    #[test]
    fn test_and_limited_to_targets() {
        let index = index();
        let query_words = words(&["love", "war"]);
        let hits = SectionSearcher::new(&index).search(
            &[Some(2)],
            SectionQuery::And {
                words: &query_words,
            },
        );
        assert_eq!(
            hits,
            vec![WordHit::new(6, 1, "war"), WordHit::new(6, 19, "love")]
        );
    }

    #[test]
    fn test_or() {
        let index = index();
        let query_words = words(&["sweet", "preface", "missing"]);
        let hits = SectionSearcher::new(&index).search(
            &ALL,
            SectionQuery::Or {
                words: &query_words,
            },
        );
        assert_eq!(
            hits,
            vec![WordHit::new(1, 3, "preface"), WordHit::new(5, 1, "sweet")]
        );
    }

    #[test]
    fn test_not() {
        let index = index();
        let required = words(&["peace"]);
        let excluded = words(&["war"]);
        let hits = SectionSearcher::new(&index).search(
            &ALL,
            SectionQuery::Not {
                required: &required,
                excluded: &excluded,
            },
        );
        assert_eq!(
            hits,
            vec![WordHit::new(4, 10, "peace"), WordHit::new(5, 7, "peace")]
        );
    }

    #[test]
    fn test_and_or() {
        let index = index();
        let required = words(&["love"]);
        let or_words = words(&["sweet", "more"]);
        let hits = SectionSearcher::new(&index).search(
            &ALL,
            SectionQuery::AndOr {
                required: &required,
                or_words: &or_words,
            },
        );
        assert_eq!(
            hits,
            vec![
                WordHit::new(2, 1, "love"),
                WordHit::new(3, 1, "more"),
                WordHit::new(4, 1, "love"),
                WordHit::new(5, 1, "sweet"),
            ]
        );
    }

    #[test]
    fn test_absent_word_fails_and_but_not_or() {
        let index = index();
        let and_words = words(&["love", "missing"]);
        let searcher = SectionSearcher::new(&index);
        assert!(
            searcher
                .search(&ALL, SectionQuery::And { words: &and_words })
                .is_empty()
        );

        let or_words = words(&["missing", "preface"]);
        assert_eq!(
            searcher.search(&ALL, SectionQuery::Or { words: &or_words }),
            vec![WordHit::new(1, 3, "preface")]
        );
    }

    #[test]
    fn test_repeated_words_are_reported_once() {
        let index = index();
        let query_words = words(&["sweet", "sweet"]);
        let hits = SectionSearcher::new(&index).search(
            &ALL,
            SectionQuery::Or {
                words: &query_words,
            },
        );
        assert_eq!(hits, vec![WordHit::new(5, 1, "sweet")]);
    }
}
