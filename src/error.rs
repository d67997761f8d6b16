//! Error types for the concordance library.
//!
//! Every fallible operation returns [`Result`], whose error side is the
//! [`ConcordanceError`] enum.
//!
//! Two situations are not errors: looking up a word that was
//! never indexed and naming a section title that does not exist. Both yield an
//! empty result so that they compose with the boolean operators.
//!
//! # Examples
//!
//! ```
//! use concordance::error::{ConcordanceError, Result};
//!
//! fn check(word: &str) -> Result<()> {
//!     if word.is_empty() {
//!         return Err(ConcordanceError::invalid_argument("empty word"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check("").is_err());
//! assert!(check("thee").is_ok());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for concordance operations.
#[derive(Error, Debug)]
pub enum ConcordanceError {
    /// I/O errors while reading the document, section index or stop words.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A query argument was rejected at the boundary (empty word, phrase,
    /// prefix, title or word list).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Structural problems that make the index impossible to build.
    #[error("Index error: {0}")]
    Index(String),

    /// Malformed loader input.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with ConcordanceError.
pub type Result<T> = std::result::Result<T, ConcordanceError>;

impl ConcordanceError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ConcordanceError::InvalidArgument(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        ConcordanceError::Index(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        ConcordanceError::Parse(msg.into())
    }

    /// Returns true if this error was raised by argument validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ConcordanceError::InvalidArgument(_))
    }
}
