//! Named sections of the document.
//!
//! A section is a contiguous run of lines that starts at its start line and
//! ends just before the next section's start line; the last section runs to
//! the end of the document. Lines before the first start line belong to no
//! section.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConcordanceError, Result};
use crate::index::posting::SectionId;

/// One section of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    /// Lowercased, trimmed title.
    pub title: String,
    /// 1-based first line of the section.
    pub start_line: u32,
}

/// Ordered sections plus a title lookup table.
#[derive(Debug, Clone, Default)]
pub struct SectionTable {
    sections: Vec<Section>,
    by_title: AHashMap<String, SectionId>,
}

impl SectionTable {
    /// A document without sections.
    pub fn empty() -> Self {
        SectionTable::default()
    }

    /// Build the table from `(title, start_line)` pairs.
    ///
    /// Start lines must be positive and strictly ascending; titles must be
    /// non-empty and unique (ignoring case). Anything else is an index error.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut table = SectionTable::empty();

        for (title, start_line) in entries {
            let title = normalize_title(title.as_ref());
            let id = table.sections.len();

            if title.is_empty() {
                return Err(ConcordanceError::index(format!(
                    "section {id} has an empty title"
                )));
            }
            if start_line == 0 {
                return Err(ConcordanceError::index(format!(
                    "section '{title}' starts at line 0, lines are numbered from 1"
                )));
            }
            if let Some(previous) = table.sections.last() {
                if start_line <= previous.start_line {
                    return Err(ConcordanceError::index(format!(
                        "section '{title}' starts at line {start_line}, \
                         not after '{}' at line {}",
                        previous.title, previous.start_line
                    )));
                }
            }
            if table.by_title.insert(title.clone(), id).is_some() {
                return Err(ConcordanceError::index(format!(
                    "duplicate section title '{title}'"
                )));
            }

            table.sections.push(Section {
                id,
                title,
                start_line,
            });
        }

        Ok(table)
    }

    /// Look a section up by title, ignoring case and surrounding whitespace.
    pub fn resolve(&self, title: &str) -> Option<&Section> {
        self.by_title
            .get(&normalize_title(title))
            .map(|&id| &self.sections[id])
    }

    /// The section containing `line`, or `None` before the first section.
    pub fn section_for_line(&self, line: u32) -> Option<SectionId> {
        let after = self.sections.partition_point(|s| s.start_line <= line);
        after.checked_sub(1)
    }

    /// A cursor that yields section ids for ascending line numbers.
    pub fn cursor(&self) -> SectionCursor<'_> {
        SectionCursor {
            table: self,
            next: 0,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Tracks the current section while lines are scanned in order.
///
/// The cursor only moves forward, so each line costs amortised O(1).
#[derive(Debug)]
pub struct SectionCursor<'a> {
    table: &'a SectionTable,
    /// Index of the first section that has not started yet.
    next: usize,
}

impl SectionCursor<'_> {
    /// Section id of `line`. Lines must be passed in non-decreasing order.
    pub fn advance(&mut self, line: u32) -> Option<SectionId> {
        while self
            .table
            .sections
            .get(self.next)
            .is_some_and(|s| s.start_line <= line)
        {
            self.next += 1;
        }
        self.next.checked_sub(1)
    }
}

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}
