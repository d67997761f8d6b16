//! Phrase matching against the raw document text.
//!
//! A phrase is located by taking every occurrence of its first word from the
//! trie and walking the stored lines from there, one character at a time.
//! Letters, digits and interior apostrophes are compared. Whitespace and the
//! end of a line read as a space, with a run of them collapsing to one, so a
//! phrase can continue onto the next line. Every other character is skipped:
//! `to-morrow` reads as `tomorrow` and `be,or` as `beor`. The phrase itself is
//! reduced by the same rules before it is compared.

use crate::analysis::tokenizer::is_word_char;
use crate::index::indexer::DocumentIndex;
use crate::index::lines::LineStore;
use crate::index::posting::Posting;

/// How the walk treats one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Skip,
}

fn classify(chars: &[char], position: usize) -> CharClass {
    let c = chars[position];
    if is_word_char(c) || (c == '\'' && is_interior_apostrophe(chars, position)) {
        CharClass::Word
    } else if c.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Skip
    }
}

/// A phrase reduced to the characters the walk compares.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pattern {
    /// The first word, used to pick candidate start positions.
    first_word: String,
    chars: Vec<char>,
}

impl Pattern {
    fn parse(phrase: &str) -> Self {
        let raw: Vec<char> = phrase.to_lowercase().chars().collect();

        let mut chars = Vec::with_capacity(raw.len());
        let mut in_space = true;
        for position in 0..raw.len() {
            match classify(&raw, position) {
                CharClass::Word => {
                    chars.push(raw[position]);
                    in_space = false;
                }
                CharClass::Space if !in_space => {
                    chars.push(' ');
                    in_space = true;
                }
                _ => {}
            }
        }
        if chars.last() == Some(&' ') {
            chars.pop();
        }

        let first_word = (0..raw.len())
            .skip_while(|&position| classify(&raw, position) != CharClass::Word)
            .take_while(|&position| classify(&raw, position) == CharClass::Word)
            .map(|position| raw[position])
            .collect();

        Pattern { first_word, chars }
    }

    /// True when the phrase is its first word and nothing else.
    fn is_single_word(&self) -> bool {
        self.chars.iter().copied().eq(self.first_word.chars())
    }
}

/// Finds phrase occurrences in a [`DocumentIndex`].
#[derive(Debug, Clone, Copy)]
pub struct PhraseMatcher<'a> {
    index: &'a DocumentIndex,
}

impl<'a> PhraseMatcher<'a> {
    pub fn new(index: &'a DocumentIndex) -> Self {
        PhraseMatcher { index }
    }

    /// Start positions of `phrase`, in document order.
    ///
    /// A single word is answered from the trie alone. A phrase with no word
    /// characters matches nothing.
    pub fn find(&self, phrase: &str) -> Vec<Posting> {
        let pattern = Pattern::parse(phrase);
        if pattern.first_word.is_empty() {
            return Vec::new();
        }

        let candidates = self.index.trie().occurrences(&pattern.first_word);
        if pattern.is_single_word() {
            return candidates.to_vec();
        }

        candidates
            .iter()
            .copied()
            .filter(|&start| self.matches_at(&pattern.chars, start))
            .collect()
    }

    /// True if the walk from `start` spells out `phrase`.
    pub fn matches_at(&self, phrase: &[char], start: Posting) -> bool {
        let Some(mut text) = TextWalker::new(self.index.lines(), start) else {
            return false;
        };

        phrase
            .iter()
            .all(|&expected| text.next() == Some(expected))
    }
}

/// Iterates the document from a position, yielding word characters and a
/// single `' '` for every run of whitespace and line ends.
struct TextWalker<'a> {
    lines: &'a LineStore,
    line: u32,
    chars: Vec<char>,
    position: usize,
    in_space: bool,
}

impl<'a> TextWalker<'a> {
    fn new(lines: &'a LineStore, start: Posting) -> Option<Self> {
        let text = lines.line(start.line)?;
        Some(TextWalker {
            lines,
            line: start.line,
            chars: text.chars().collect(),
            position: (start.column as usize).saturating_sub(1),
            in_space: true,
        })
    }
}

impl Iterator for TextWalker<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if self.position >= self.chars.len() {
                self.line += 1;
                let text = self.lines.line(self.line)?;
                self.chars = text.chars().collect();
                self.position = 0;
                if !self.in_space {
                    self.in_space = true;
                    return Some(' ');
                }
                continue;
            }

            let class = classify(&self.chars, self.position);
            let c = self.chars[self.position];
            self.position += 1;

            match class {
                CharClass::Word => {
                    self.in_space = false;
                    return Some(c);
                }
                CharClass::Space if !self.in_space => {
                    self.in_space = true;
                    return Some(' ');
                }
                _ => {}
            }
        }
    }
}

/// An apostrophe is interior when a word character is reachable on both sides
/// through nothing but apostrophes.
fn is_interior_apostrophe(chars: &[char], position: usize) -> bool {
    let before = chars[..position]
        .iter()
        .rev()
        .find(|&&c| c != '\'')
        .is_some_and(|&c| is_word_char(c));
    let after = chars[position + 1..]
        .iter()
        .find(|&&c| c != '\'')
        .is_some_and(|&c| is_word_char(c));
    before && after
}
