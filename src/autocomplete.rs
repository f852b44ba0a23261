//! Prefix-indexed, frequency-weighted autocomplete.
//!
//! Suggestions are observable to users, so ordering must be deterministic
//! across rebuilds: descending frequency, ties broken by ascending lexical
//! order.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
    frequency: u64,
}

/// A rooted character trie decorated with completion frequencies.
///
/// Invariants: `frequency > 0` implies `terminal`; traversing to any
/// terminal reproduces the inserted word exactly (case-folded); re-inserting
/// a word adds to its frequency and never duplicates terminal status.
#[derive(Debug, Default)]
pub struct AutocompleteTrie {
    root: TrieNode,
}

impl AutocompleteTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word with frequency 1.
    pub fn insert(&mut self, word: &str) {
        self.insert_with_frequency(word, 1);
    }

    /// Insert a word, adding `frequency` to its counter.
    pub fn insert_with_frequency(&mut self, word: &str, frequency: u64) {
        let word = word.to_lowercase();
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.terminal = true;
        node.frequency += frequency;
    }

    /// The most frequent completions of `prefix`, best first.
    ///
    /// An empty prefix or a prefix with no node yields an empty vec. At most
    /// `limit` words are returned, without their frequencies.
    pub fn search_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        if prefix.is_empty() {
            return Vec::new();
        }

        let prefix = prefix.to_lowercase();
        let mut node = &self.root;
        for ch in prefix.chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }

        let mut completions: Vec<(String, u64)> = Vec::new();
        let mut buf = prefix;
        collect_words(node, &mut buf, &mut completions);

        completions.sort_by(|(word_a, freq_a), (word_b, freq_b)| {
            freq_b.cmp(freq_a).then_with(|| word_a.cmp(word_b))
        });
        completions.truncate(limit);
        completions.into_iter().map(|(word, _)| word).collect()
    }
}

/// Depth-first collection of all terminal descendants as (word, frequency).
fn collect_words(node: &TrieNode, buf: &mut String, out: &mut Vec<(String, u64)>) {
    if node.terminal {
        out.push((buf.clone(), node.frequency));
    }
    for (&ch, child) in &node.children {
        buf.push(ch);
        collect_words(child, buf, out);
        buf.pop();
    }
}
