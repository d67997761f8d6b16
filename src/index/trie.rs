//! Prefix tree over the characters of every indexed word.
//!
//! Each [`TrieNode`] owns its children and carries the [`PostingsList`] of the
//! word that ends there. A node is a word node exactly when its postings are
//! non-empty. Children are kept in insertion order and found by linear scan;
//! the alphabet (letters, digits, apostrophe) keeps fan-out small.
//!
//! # Examples
//!
//! ```
//! use concordance::index::posting::Posting;
//! use concordance::index::trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.add_occurrence("thee", Posting::new(1, 5), Some(0));
//! trie.add_occurrence("then", Posting::new(2, 1), Some(0));
//!
//! assert_eq!(trie.occurrences("thee"), &[Posting::new(1, 5)]);
//! assert!(trie.occurrences("the").is_empty());
//! assert_eq!(trie.occurrences_for_subtree("the").len(), 2);
//! ```

use ahash::AHashSet;

use crate::index::posting::{Posting, PostingsList, SectionId};

/// A node of the trie.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    value: char,
    children: Vec<TrieNode>,
    postings: PostingsList,
}

impl TrieNode {
    fn new(value: char) -> Self {
        TrieNode {
            value,
            children: Vec::new(),
            postings: PostingsList::new(),
        }
    }

    /// The character on the edge into this node. The root holds `'\0'`.
    pub fn value(&self) -> char {
        self.value
    }

    /// True if a word ends at this node.
    pub fn is_word(&self) -> bool {
        !self.postings.is_empty()
    }

    /// The child reached by `c`, if any.
    pub fn child(&self, c: char) -> Option<&TrieNode> {
        self.children.iter().find(|child| child.value == c)
    }

    /// The child reached by `c`, created if missing. The flag reports
    /// whether a node was created.
    fn child_or_insert(&mut self, c: char) -> (&mut TrieNode, bool) {
        match self.children.iter().position(|child| child.value == c) {
            Some(index) => (&mut self.children[index], false),
            None => {
                self.children.push(TrieNode::new(c));
                let last = self.children.len() - 1;
                (&mut self.children[last], true)
            }
        }
    }

    pub fn postings(&self) -> &PostingsList {
        &self.postings
    }

    /// Depth-first walk over this node and all of its descendants.
    fn visit<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a TrieNode),
    {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }
}

/// A prefix tree of word occurrences.
///
/// Every trie owns an independent root.
#[derive(Debug, Clone, Default)]
pub struct Trie {
    root: TrieNode,
    word_count: usize,
    node_count: usize,
}

impl Trie {
    /// Create a new empty trie.
    pub fn new() -> Self {
        Trie::default()
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Walk down from the root as far as `word` allows.
    ///
    /// Returns the deepest node reached and the number of characters of `word`
    /// that were matched.
    pub fn longest_prefix(&self, word: &str) -> (&TrieNode, usize) {
        let mut node = &self.root;
        let mut matched = 0;
        for c in word.chars() {
            match node.child(c) {
                Some(child) => {
                    node = child;
                    matched += 1;
                }
                None => break,
            }
        }
        (node, matched)
    }

    /// The node whose path spells exactly `word`.
    pub fn node(&self, word: &str) -> Option<&TrieNode> {
        let (node, matched) = self.longest_prefix(word);
        (matched == word.chars().count()).then_some(node)
    }

    /// Record one occurrence of `word`.
    ///
    /// Missing nodes along the path are created. Empty words are ignored.
    pub fn add_occurrence(&mut self, word: &str, posting: Posting, section: Option<SectionId>) {
        if word.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for c in word.chars() {
            let (child, created) = node.child_or_insert(c);
            if created {
                self.node_count += 1;
            }
            node = child;
        }
        if !node.is_word() {
            self.word_count += 1;
        }
        node.postings.add(posting, section);
    }

    /// Postings of `word`, or an empty slice if the word was never indexed.
    pub fn occurrences(&self, word: &str) -> &[Posting] {
        self.node(word)
            .map(|node| node.postings.postings())
            .unwrap_or(&[])
    }

    /// The full postings list of `word`.
    pub fn postings(&self, word: &str) -> Option<&PostingsList> {
        self.node(word)
            .filter(|node| node.is_word())
            .map(|node| &node.postings)
    }

    /// Postings of `prefix` and of every word that extends it.
    ///
    /// Results are in depth-first traversal order, not document order.
    pub fn occurrences_for_subtree(&self, prefix: &str) -> Vec<Posting> {
        let mut occurrences = Vec::new();
        if let Some(node) = self.node(prefix) {
            node.visit(&mut |n: &TrieNode| {
                occurrences.extend_from_slice(n.postings.postings());
            });
        }
        occurrences
    }

    /// Distinct sections `word` occurs in.
    pub fn section_set(&self, word: &str) -> Option<&AHashSet<SectionId>> {
        self.postings(word).map(|postings| postings.section_set())
    }

    /// Section id of every occurrence of `word`, parallel to its postings.
    pub fn section_ids(&self, word: &str) -> &[Option<SectionId>] {
        self.postings(word)
            .map(|postings| postings.section_ids())
            .unwrap_or(&[])
    }

    /// Number of distinct words.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Total number of postings across all words.
    pub fn posting_count(&self) -> usize {
        let mut total = 0;
        self.root.visit(&mut |node: &TrieNode| total += node.postings.len());
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(words: &[(&str, u32, u32)]) -> Trie {
        let mut trie = Trie::new();
        for &(word, line, column) in words {
            trie.add_occurrence(word, Posting::new(line, column), Some(0));
        }
        trie
    }

    #[test]
    fn test_occurrences() {
        let trie = build(&[("thee", 1, 1), ("the", 1, 6), ("thee", 2, 3)]);
        assert_eq!(
            trie.occurrences("thee"),
            &[Posting::new(1, 1), Posting::new(2, 3)]
        );
        assert_eq!(trie.occurrences("the"), &[Posting::new(1, 6)]);
    }

    #[test]
    fn test_missing_words_are_empty() {
        let trie = build(&[("thee", 1, 1)]);
        assert!(trie.occurrences("th").is_empty());
        assert!(trie.occurrences("thees").is_empty());
        assert!(trie.occurrences("xyz").is_empty());
        assert!(trie.postings("th").is_none());
        assert!(trie.section_set("thee").is_some());
        assert!(trie.section_set("th").is_none());
        assert!(trie.section_ids("th").is_empty());
    }

    #[test]
    fn test_interior_nodes_are_not_words() {
        let trie = build(&[("thee", 1, 1)]);
        let (node, matched) = trie.longest_prefix("thx");
        assert_eq!(matched, 2);
        assert_eq!(node.value(), 'h');
        assert!(!node.is_word());
        assert!(trie.node("thee").unwrap().is_word());
    }

    #[test]
    fn test_add_then_get_is_idempotent() {
        let mut trie = build(&[("love", 4, 2)]);
        let before = trie.occurrences("love").len();
        trie.add_occurrence("love", Posting::new(9, 1), Some(0));

        let first = trie.occurrences("love").to_vec();
        let second = trie.occurrences("love").to_vec();
        assert_eq!(first.len(), before + 1);
        assert_eq!(first.iter().filter(|p| **p == Posting::new(9, 1)).count(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_subtree() {
        let trie = build(&[
            ("obscure", 1, 1),
            ("obscured", 2, 1),
            ("obscurely", 3, 1),
            ("obscures", 4, 1),
            ("obey", 5, 1),
        ]);
        let mut found = trie.occurrences_for_subtree("obscure");
        found.sort();
        assert_eq!(
            found,
            vec![
                Posting::new(1, 1),
                Posting::new(2, 1),
                Posting::new(3, 1),
                Posting::new(4, 1)
            ]
        );
        assert_eq!(trie.occurrences_for_subtree("ob").len(), 5);
        assert!(trie.occurrences_for_subtree("obx").is_empty());
    }

    #[test]
    fn test_counts() {
        let trie = build(&[("a", 1, 1), ("ab", 1, 3), ("a", 2, 1), ("b", 2, 3)]);
        assert_eq!(trie.word_count(), 3);
        assert_eq!(trie.node_count(), 3);
        assert_eq!(trie.posting_count(), 4);
    }

    #[test]
    fn test_empty_word_is_ignored() {
        let mut trie = Trie::new();
        trie.add_occurrence("", Posting::new(1, 1), None);
        assert_eq!(trie.posting_count(), 0);
        assert!(!trie.root().is_word());
    }

    #[test]
    fn test_independent_roots() {
        let first = build(&[("alpha", 1, 1)]);
        let second = build(&[("beta", 1, 1)]);
        assert!(first.occurrences("beta").is_empty());
        assert!(second.occurrences("alpha").is_empty());
    }
}
