//! Text analysis for the concordance.
//!
//! Analysis turns a lowercased document line into the words that are threaded
//! into the trie, and normalises query input with exactly the same rules.
//!
//! - [`token`] - the [`token::Token`] unit and the [`token::TokenStream`] alias
//! - [`tokenizer`] - the [`tokenizer::Tokenizer`] trait and [`tokenizer::LineTokenizer`]
//! - [`stop`] - the [`stop::StopWords`] set consulted by boolean queries

pub mod stop;
pub mod token;
pub mod tokenizer;
