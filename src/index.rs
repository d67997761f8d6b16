//! The positional inverted index.
//!
//! # Architecture
//!
//! - [`trie::Trie`] maps every word to a [`posting::PostingsList`] of
//!   `(line, column)` occurrences, each tagged with a section id
//! - [`section::SectionTable`] resolves titles and assigns lines to sections
//! - [`lines::LineStore`] keeps the raw text for phrase verification
//! - [`indexer::Indexer`] scans the document and produces an
//!   [`indexer::DocumentIndex`]
//!
//! The index is built in one pass and never modified afterwards.

pub mod indexer;
pub mod lines;
pub mod posting;
pub mod section;
pub mod trie;
