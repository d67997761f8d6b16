//! Postings: where a word occurs and which section each occurrence lies in.

use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Zero-based section identifier.
pub type SectionId = usize;

/// A single occurrence of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Posting {
    /// 1-based line number.
    pub line: u32,
    /// 1-based character column of the word's first character.
    pub column: u32,
}

impl Posting {
    /// Create a new posting.
    pub fn new(line: u32, column: u32) -> Self {
        Posting { line, column }
    }
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// The per-word postings stored on a trie node.
///
/// `postings` and `section_ids` are parallel and both non-decreasing because
/// occurrences are appended in document scan order. Postings that precede the
/// first section carry `None`, which orders before every `Some`.
#[derive(Debug, Clone, Default)]
pub struct PostingsList {
    postings: Vec<Posting>,
    section_ids: Vec<Option<SectionId>>,
    section_set: AHashSet<SectionId>,
}

impl PostingsList {
    /// Create a new empty postings list.
    pub fn new() -> Self {
        PostingsList::default()
    }

    /// Append an occurrence.
    pub fn add(&mut self, posting: Posting, section: Option<SectionId>) {
        debug_assert!(
            self.postings.last().is_none_or(|last| last.line <= posting.line),
            "postings must be appended in line order"
        );
        debug_assert!(
            self.section_ids.last().is_none_or(|last| *last <= section),
            "section ids must be appended in order"
        );

        self.postings.push(posting);
        self.section_ids.push(section);
        if let Some(id) = section {
            self.section_set.insert(id);
        }
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn section_ids(&self) -> &[Option<SectionId>] {
        &self.section_ids
    }

    pub fn section_set(&self) -> &AHashSet<SectionId> {
        &self.section_set
    }

    /// True if the word occurs in section `section` (`None` is the text before
    /// the first section).
    pub fn in_section(&self, section: Option<SectionId>) -> bool {
        match section {
            Some(id) => self.section_set.contains(&id),
            None => self.section_ids.first() == Some(&None),
        }
    }

    /// The postings that fall inside `section`.
    ///
    /// A binary search over `section_ids` finds one matching index, then the
    /// range is widened in both directions while the id still matches. This
    /// relies on the ids of one section being index-contiguous.
    pub fn postings_in_section(&self, section: Option<SectionId>) -> &[Posting] {
        let Ok(found) = self.section_ids.binary_search(&section) else {
            return &[];
        };

        let mut start = found;
        while start > 0 && self.section_ids[start - 1] == section {
            start -= 1;
        }
        let mut end = found + 1;
        while end < self.section_ids.len() && self.section_ids[end] == section {
            end += 1;
        }

        &self.postings[start..end]
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
