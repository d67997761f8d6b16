//! Query evaluation over a built [`DocumentIndex`](crate::index::indexer::DocumentIndex).
//!
//! - [`set_ops`]: AND, OR and NOT over sorted line-number sequences.
//! - [`phrase`]: consecutive-word matching against the stored lines.
//! - [`section`]: boolean search scoped to named sections.
//!
//! Most callers go through [`QueryEngine`](crate::engine::QueryEngine), which
//! validates and normalises input before handing it to these modules.

pub mod phrase;
pub mod section;
pub mod set_ops;

pub use section::WordHit;
