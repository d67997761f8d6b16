//! Builds a [`DocumentIndex`] from lowercased document lines.
//!
//! Lines are scanned once, in order. Every word is threaded into the trie with
//! its `(line, column)` posting and the id of the section that contains the
//! line. The section is looked up once per line with a forward-only cursor.

use std::sync::Arc;

use log::{debug, info};

use crate::analysis::tokenizer::{LineTokenizer, Tokenizer};
use crate::error::Result;
use crate::index::lines::LineStore;
use crate::index::posting::Posting;
use crate::index::section::SectionTable;
use crate::index::trie::Trie;

/// Everything a query needs: the trie, the raw lines and the sections.
///
/// Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    trie: Trie,
    lines: LineStore,
    sections: SectionTable,
}

impl DocumentIndex {
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn lines(&self) -> &LineStore {
        &self.lines
    }

    pub fn sections(&self) -> &SectionTable {
        &self.sections
    }
}

/// Scans lines and fills the trie.
pub struct Indexer {
    tokenizer: Arc<dyn Tokenizer>,
}

impl Default for Indexer {
    fn default() -> Self {
        Indexer::new(Arc::new(LineTokenizer::new()))
    }
}

impl Indexer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Indexer { tokenizer }
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Index `lines` (already lowercased; line 1 first) against `sections`.
    pub fn build(&self, lines: Vec<String>, sections: SectionTable) -> Result<DocumentIndex> {
        let lines = LineStore::new(lines);
        let mut trie = Trie::new();
        let mut cursor = sections.cursor();

        for (number, text) in lines.numbered() {
            let section = cursor.advance(number);
            for token in self.tokenizer.tokenize(text)? {
                trie.add_occurrence(&token.text, Posting::new(number, token.column), section);
            }
        }

        debug!(
            "tokenizer '{}' produced {} trie nodes",
            self.tokenizer.name(),
            trie.node_count()
        );
        info!(
            "indexed {} lines: {} distinct words, {} occurrences, {} sections",
            lines.len(),
            trie.word_count(),
            trie.posting_count(),
            sections.len()
        );

        Ok(DocumentIndex {
            trie,
            lines,
            sections,
        })
    }
}
