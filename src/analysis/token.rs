//! Token type produced by the tokenizer.
//!
//! # Examples
//!
//! ```
//! use concordance::analysis::token::Token;
//!
//! let token = Token::new("thee", 5);
//! assert_eq!(token.text, "thee");
//! assert_eq!(token.column, 5);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single word found on a line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The word text, already stripped of leading and trailing apostrophes.
    pub text: String,

    /// 1-based character column of the first retained character.
    pub column: u32,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(text: S, column: u32) -> Self {
        Token {
            text: text.into(),
            column,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.text, self.column)
    }
}

/// A stream of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        let token = Token::new("o'er", 12);
        assert_eq!(token.to_string(), "o'er@12");
    }
}
