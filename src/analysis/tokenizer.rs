//! Tokenizers that split a document line into words.
//!
//! The concordance indexes a line by cutting it at every character that is
//! neither a letter, a digit nor an apostrophe. Apostrophes survive only in
//! the interior of a word: `'tis` becomes `tis` (and its column moves one to
//! the right) while `dyer's` is kept whole.
//!
//! # Examples
//!
//! ```
//! use concordance::analysis::tokenizer::{LineTokenizer, Tokenizer};
//!
//! let tokenizer = LineTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("'tis the dyer's hand").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "tis");
//! assert_eq!(tokens[0].column, 2);
//! assert_eq!(tokens[2].text, "dyer's");
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Returns true for characters that extend a word.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Trait for tokenizers that convert a line of text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can live inside a shared
/// query engine.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Lowercase `text` and return just the words, in order.
    ///
    /// Query input goes through this so that `"Hello,  World"` and the indexed
    /// words `hello` `world` agree.
    fn words(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .tokenize(&text.to_lowercase())?
            .map(|token| token.text)
            .collect())
    }
}

/// The tokenizer used to build the concordance.
#[derive(Clone, Debug, Default)]
pub struct LineTokenizer;

impl LineTokenizer {
    /// Create a new line tokenizer.
    pub fn new() -> Self {
        LineTokenizer
    }

    /// Close off the buffered word, dropping outer apostrophes.
    fn finish(buffer: &str, start: u32) -> Option<Token> {
        let leading = buffer.chars().take_while(|&c| c == '\'').count() as u32;
        let word = buffer.trim_matches('\'');
        if word.is_empty() {
            None
        } else {
            Some(Token::new(word, start + leading))
        }
    }
}

impl Tokenizer for LineTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut buffer = String::new();
        let mut start = 0;

        for (index, c) in text.chars().enumerate() {
            if is_word_char(c) || c == '\'' {
                if buffer.is_empty() {
                    start = index as u32 + 1;
                }
                buffer.push(c);
            } else if !buffer.is_empty() {
                tokens.extend(Self::finish(&buffer, start));
                buffer.clear();
            }
        }
        if !buffer.is_empty() {
            tokens.extend(Self::finish(&buffer, start));
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "line"
    }
}
